//! Handler der zeitbegrenzten Session-Variante
//!
//! Nutzt die In-Memory-Session-Verwaltung mit durabler Ablage und einen
//! konfigurierbaren Cookie-Namen statt des festen `session_id`.

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use pfoertner_auth::basic::benutzer_aus_anmeldedaten;

use crate::middleware::{cookie_setzen, cookie_wert, interner_fehler};
use crate::ApiZustand;

#[derive(Debug, Deserialize)]
pub struct VariantenAnmeldenBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn fehler(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(json!({ "error": nachricht }))).into_response()
}

/// POST /auth_session/login
pub async fn post_login(
    State(zustand): State<ApiZustand>,
    Form(body): Form<VariantenAnmeldenBody>,
) -> Response {
    let email = match body.email.as_deref() {
        Some(e) if !e.is_empty() => e,
        _ => return fehler(StatusCode::BAD_REQUEST, "email missing"),
    };
    let passwort = match body.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return fehler(StatusCode::BAD_REQUEST, "password missing"),
    };

    // Unbekannte E-Mail und falsches Passwort werden einheitlich gemeldet
    let benutzer =
        match benutzer_aus_anmeldedaten(zustand.auth.repo().as_ref(), email, passwort).await {
            Ok(Some(b)) => b,
            Ok(None) => return fehler(StatusCode::UNAUTHORIZED, "wrong email or password"),
            Err(e) => return interner_fehler(e),
        };

    let session_id = match zustand.sessions.erstellen(benutzer.id).await {
        Ok(id) => id,
        Err(e) => return interner_fehler(e),
    };

    let cookie = match cookie_setzen(&zustand.session_cookie_name, &session_id) {
        Some(c) => c,
        None => return interner_fehler("Set-Cookie-Header nicht baubar"),
    };

    let mut antwort = (
        StatusCode::OK,
        Json(json!({ "id": benutzer.id, "email": benutzer.email })),
    )
        .into_response();
    antwort.headers_mut().insert(header::SET_COOKIE, cookie);
    antwort
}

/// DELETE /auth_session/logout
pub async fn delete_logout(State(zustand): State<ApiZustand>, headers: HeaderMap) -> Response {
    let session_id = match cookie_wert(&headers, &zustand.session_cookie_name) {
        Some(id) => id,
        None => return fehler(StatusCode::NOT_FOUND, "Not found"),
    };

    match zustand.sessions.beenden(&session_id).await {
        Ok(true) => (StatusCode::OK, Json(json!({}))).into_response(),
        Ok(false) => fehler(StatusCode::NOT_FOUND, "Not found"),
        Err(e) => interner_fehler(e),
    }
}
