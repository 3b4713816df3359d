//! Handler fuer Login, Logout und Profil (Ein-Token-Modell)

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::middleware::{
    cookie_loeschen, cookie_setzen, cookie_wert, fehler_antwort, interner_fehler,
};
use crate::ApiZustand;

/// Fester Cookie-Name des Ein-Token-Modells
const SESSION_COOKIE: &str = "session_id";

#[derive(Debug, Deserialize)]
pub struct AnmeldenBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /sessions – Anmeldung, setzt das Session-Cookie
pub async fn post_sessions(
    State(zustand): State<ApiZustand>,
    Form(body): Form<AnmeldenBody>,
) -> Response {
    let (email, passwort) = match (body.email, body.password) {
        (Some(e), Some(p)) => (e, p),
        _ => return fehler_antwort(StatusCode::BAD_REQUEST, "email and password required"),
    };

    match zustand.auth.anmeldung_pruefen(&email, &passwort).await {
        Ok(true) => {}
        Ok(false) => return fehler_antwort(StatusCode::UNAUTHORIZED, "invalid credentials"),
        Err(e) => return interner_fehler(e),
    }

    let token = match zustand.auth.session_erstellen(&email).await {
        Ok(Some(t)) => t,
        // Benutzer zwischen Pruefung und Session-Erstellung verschwunden
        Ok(None) => return fehler_antwort(StatusCode::UNAUTHORIZED, "invalid credentials"),
        Err(e) => return interner_fehler(e),
    };

    let cookie = match cookie_setzen(SESSION_COOKIE, &token) {
        Some(c) => c,
        None => return interner_fehler("Set-Cookie-Header nicht baubar"),
    };

    let mut antwort = (
        StatusCode::OK,
        Json(json!({ "email": email, "message": "logged in" })),
    )
        .into_response();
    antwort.headers_mut().insert(header::SET_COOKIE, cookie);
    antwort
}

/// DELETE /sessions – Abmeldung, loescht Cookie und leitet um
pub async fn delete_sessions(
    State(zustand): State<ApiZustand>,
    headers: HeaderMap,
) -> Response {
    let token = match cookie_wert(&headers, SESSION_COOKIE) {
        Some(t) => t,
        None => return fehler_antwort(StatusCode::FORBIDDEN, "Forbidden"),
    };

    let benutzer = match zustand.auth.benutzer_fuer_session(&token).await {
        Ok(Some(b)) => b,
        Ok(None) => return fehler_antwort(StatusCode::FORBIDDEN, "Forbidden"),
        Err(e) => return interner_fehler(e),
    };

    if let Err(e) = zustand.auth.session_beenden(benutzer.id).await {
        return interner_fehler(e);
    }

    let mut antwort = StatusCode::FOUND.into_response();
    antwort
        .headers_mut()
        .insert(header::LOCATION, header::HeaderValue::from_static("/"));
    if let Some(cookie) = cookie_loeschen(SESSION_COOKIE) {
        antwort.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    antwort
}

/// GET /profile – E-Mail des angemeldeten Benutzers
pub async fn get_profile(State(zustand): State<ApiZustand>, headers: HeaderMap) -> Response {
    let token = match cookie_wert(&headers, SESSION_COOKIE) {
        Some(t) => t,
        None => return fehler_antwort(StatusCode::FORBIDDEN, "Forbidden"),
    };

    match zustand.auth.benutzer_fuer_session(&token).await {
        Ok(Some(benutzer)) => {
            (StatusCode::OK, Json(json!({ "email": benutzer.email }))).into_response()
        }
        Ok(None) => fehler_antwort(StatusCode::FORBIDDEN, "Forbidden"),
        Err(e) => interner_fehler(e),
    }
}
