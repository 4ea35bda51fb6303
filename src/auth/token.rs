use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

use super::AuthError;

/// Claims carried by a session token. `sid` must match a live session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, session_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            sid: session_id,
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
        }
    }
}

fn secret() -> Result<&'static str, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::Token("JWT secret not configured".to_string()));
    }
    Ok(secret.as_str())
}

pub fn generate_token(claims: &Claims) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret()?.as_bytes());
    encode(&Header::default(), claims, &key).map_err(|e| AuthError::Token(e.to_string()))
}

pub fn validate_token(token: &str) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret()?.as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| AuthError::Token(format!("Invalid session token: {}", e)))
}
