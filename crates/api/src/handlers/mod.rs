//! HTTP-Handler, gruppiert nach Endpunktfamilie

pub mod benutzer;
pub mod reset;
pub mod session_auth;
pub mod sessions;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// GET / – Index
pub async fn index() -> Response {
    (StatusCode::OK, Json(json!({ "message": "Bienvenue" }))).into_response()
}
