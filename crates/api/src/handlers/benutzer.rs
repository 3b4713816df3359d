//! Handler fuer die Benutzer-Registrierung

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use pfoertner_auth::AuthError;

use crate::middleware::{fehler_antwort, interner_fehler};
use crate::ApiZustand;

#[derive(Debug, Deserialize)]
pub struct RegistrierenBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /users – registriert einen neuen Benutzer
pub async fn post_users(
    State(zustand): State<ApiZustand>,
    Form(body): Form<RegistrierenBody>,
) -> Response {
    let (email, passwort) = match (body.email, body.password) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return fehler_antwort(StatusCode::BAD_REQUEST, "email and password required");
        }
    };

    match zustand.auth.registrieren(&email, &passwort).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "email": email, "message": "user created" })),
        )
            .into_response(),
        Err(AuthError::BereitsRegistriert(_)) => {
            fehler_antwort(StatusCode::BAD_REQUEST, "email already registered")
        }
        Err(e) => interner_fehler(e),
    }
}
