//! Handler fuer den Passwort-Reset-Fluss

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
pub struct ResetAnfordernBody {
    pub email: Option<String>,
}

/// POST /reset_password – stellt einen Reset-Token aus
pub async fn post_reset_password(
    State(zustand): State<ApiZustand>,
    Form(body): Form<ResetAnfordernBody>,
) -> Response {
    let email = match body.email {
        Some(e) => e,
        None => return fehler_antwort(StatusCode::BAD_REQUEST, "email required"),
    };

    match zustand.auth.reset_token_ausstellen(&email).await {
        Ok(token) => (
            StatusCode::OK,
            Json(json!({ "email": email, "reset_token": token })),
        )
            .into_response(),
        Err(AuthError::UnbekannterBenutzer(_)) => {
            fehler_antwort(StatusCode::FORBIDDEN, "Forbidden")
        }
        Err(e) => interner_fehler(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct PasswortAktualisierenBody {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

/// PUT /reset_password – setzt das Passwort per Reset-Token neu
pub async fn put_reset_password(
    State(zustand): State<ApiZustand>,
    Form(body): Form<PasswortAktualisierenBody>,
) -> Response {
    let (email, token, neues_passwort) = match (body.email, body.reset_token, body.new_password) {
        (Some(e), Some(t), Some(p)) if !e.is_empty() && !t.is_empty() && !p.is_empty() => {
            (e, t, p)
        }
        _ => {
            return fehler_antwort(
                StatusCode::BAD_REQUEST,
                "email, reset_token and new_password required",
            )
        }
    };

    match zustand
        .auth
        .passwort_aktualisieren(&email, &token, &neues_passwort)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "email": email, "message": "Password updated" })),
        )
            .into_response(),
        Err(AuthError::ResetUngueltig) => fehler_antwort(StatusCode::FORBIDDEN, "Forbidden"),
        Err(e) => interner_fehler(e),
    }
}
