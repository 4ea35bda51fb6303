use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::config;
use crate::schema::SchemaDescription;

use super::decode::{decode, extraction_error};
use super::FormError;

/// Read a form submission from `request` and decode it into a validated `T`.
pub async fn extract_form_data<T>(request: Request) -> Result<T, FormError>
where
    T: SchemaDescription + DeserializeOwned,
{
    let pairs = read_form_pairs(request).await.map_err(extraction_error)?;
    decode(pairs).await
}

/// Materialize the request body as ordered `(key, value)` pairs.
///
/// Accepts urlencoded and multipart bodies. File parts contribute their file name.
pub async fn read_form_pairs(request: Request) -> Result<Vec<(String, String)>, String> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| e.body_text())?;

        let mut pairs = Vec::new();
        while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let value = match file_name {
                Some(file_name) => file_name,
                None => field.text().await.map_err(|e| e.to_string())?,
            };
            pairs.push((name, value));
        }
        Ok(pairs)
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let limit = config::config().server.max_request_size_bytes;
        let bytes = axum::body::to_bytes(request.into_body(), limit)
            .await
            .map_err(|e| e.to_string())?;
        Ok(url::form_urlencoded::parse(&bytes).into_owned().collect())
    } else if content_type.is_empty() {
        Err("missing content type".to_string())
    } else {
        Err(format!("unsupported content type '{}'", content_type))
    }
}
