use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::models::{Planet, PlanetInput};

const COLUMNS: &str = "id, name, distance_au, diameter_km, has_rings, discovered_at, created_at";

pub struct PlanetRepository {
    pool: PgPool,
}

impl PlanetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn select_all(&self) -> Result<Vec<Planet>, DatabaseError> {
        let sql = format!("SELECT {} FROM planets ORDER BY distance_au, name", COLUMNS);
        Ok(sqlx::query_as::<_, Planet>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn select_ringed(&self) -> Result<Vec<Planet>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM planets WHERE has_rings ORDER BY distance_au, name",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Planet>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn select_404(&self, id: Uuid) -> Result<Planet, DatabaseError> {
        let sql = format!("SELECT {} FROM planets WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, Planet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Planet {} not found", id)))
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM planets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, input: &PlanetInput) -> Result<Planet, DatabaseError> {
        let sql = format!(
            "INSERT INTO planets (id, name, distance_au, diameter_km, has_rings, discovered_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Planet>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(input.distance_au)
            .bind(input.diameter_km)
            .bind(input.has_rings)
            .bind(input.discovered_at)
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn update_404(&self, id: Uuid, input: &PlanetInput) -> Result<Planet, DatabaseError> {
        let sql = format!(
            "UPDATE planets SET name = $2, distance_au = $3, diameter_km = $4, \
             has_rings = $5, discovered_at = $6 WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Planet>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.distance_au)
            .bind(input.diameter_km)
            .bind(input.has_rings)
            .bind(input.discovered_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Planet {} not found", id)))
    }

    pub async fn delete_404(&self, id: Uuid) -> Result<Planet, DatabaseError> {
        let sql = format!("DELETE FROM planets WHERE id = $1 RETURNING {}", COLUMNS);
        sqlx::query_as::<_, Planet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Planet {} not found", id)))
    }
}
