use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{validators, FieldMeta, SchemaDescription};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Planet {
    pub id: Uuid,
    pub name: String,
    pub distance_au: f64,
    pub diameter_km: f64,
    pub has_rings: bool,
    pub discovered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SchemaDescription for Planet {
    fn name() -> &'static str {
        "Planet"
    }

    fn fields() -> Vec<FieldMeta> {
        let mut fields = vec![FieldMeta::text("id")];
        fields.extend(PlanetInput::fields());
        fields.push(FieldMeta::date("created_at"));
        fields
    }
}

/// Writable planet attributes, accepted as JSON by create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetInput {
    pub name: String,
    pub distance_au: f64,
    pub diameter_km: f64,
    pub has_rings: bool,
    pub discovered_at: Option<DateTime<Utc>>,
}

impl SchemaDescription for PlanetInput {
    fn name() -> &'static str {
        "PlanetInput"
    }

    fn fields() -> Vec<FieldMeta> {
        vec![
            FieldMeta::text("name")
                .caption("Name")
                .required()
                .validate(validators::max_length(100, "Name must be at most 100 characters.")),
            FieldMeta::number("distance_au")
                .caption("Distance (AU)")
                .validate(validators::non_negative("Distance (AU) must be a non-negative number.")),
            FieldMeta::number("diameter_km")
                .caption("Diameter (km)")
                .validate(validators::non_negative("Diameter (km) must be a non-negative number.")),
            FieldMeta::boolean("has_rings").caption("Has rings"),
            FieldMeta::date("discovered_at").caption("Discovered"),
        ]
    }
}
