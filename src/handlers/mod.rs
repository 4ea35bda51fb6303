// handlers/mod.rs - Two handler tiers
//
// Public: no session needed (/, /api/health, /api/openapi.json, /auth/*).
// Protected: a live session is required; pages redirect to /auth/login,
// JSON endpoints answer 401.

pub mod pages;
pub mod protected;
pub mod public;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// `302 Found` to `location`, optionally setting a cookie on the way.
pub fn found(location: &'static str, cookie: Option<HeaderValue>) -> Response {
    let mut response = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();
    if let Some(cookie) = cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}
