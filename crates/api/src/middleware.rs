//! Axum-Middleware und Request-Helfer

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use pfoertner_auth::{auth_erforderlich, basic::benutzer_aus_basic_header};

use crate::ApiZustand;

/// Fehlerantwort im einheitlichen `{"message": ...}`-Format
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(json!({ "message": nachricht }))).into_response()
}

/// Antwort fuer unerwartete Engine-/Store-Fehler
pub fn interner_fehler(fehler: impl std::fmt::Display) -> Response {
    tracing::error!(fehler = %fehler, "Interner Fehler in der HTTP-Schicht");
    fehler_antwort(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

/// Liest den Wert eines benannten Cookies aus dem `Cookie`-Header
pub fn cookie_wert(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|paar| {
        let (k, v) = paar.trim().split_once('=')?;
        (k == name).then(|| v.to_string())
    })
}

/// Liest den `Authorization`-Header als String
pub fn autorisierung_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
}

/// Baut einen `Set-Cookie`-Headerwert fuer eine Session
pub fn cookie_setzen(name: &str, wert: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{name}={wert}; Path=/; HttpOnly")).ok()
}

/// Baut einen `Set-Cookie`-Headerwert der das Cookie loescht
pub fn cookie_loeschen(name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{name}=; Path=/; Max-Age=0")).ok()
}

/// Basic-Auth-Gate
///
/// Pfade, fuer die `auth_erforderlich` false liefert, passieren ungeprueft.
/// Alle anderen brauchen einen gueltigen `Authorization: Basic`-Header:
/// fehlender Header -> 401, nicht aufloesbare Anmeldedaten -> 403.
pub async fn basic_gate(
    State(zustand): State<ApiZustand>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let pfad = req.uri().path().to_string();
    if !auth_erforderlich(Some(&pfad), Some(&zustand.gate_ausnahmen)) {
        return next.run(req).await;
    }

    let header = match autorisierung_header(req.headers()) {
        Some(h) => h.to_string(),
        None => return fehler_antwort(StatusCode::UNAUTHORIZED, "Unauthorized"),
    };

    match benutzer_aus_basic_header(zustand.auth.repo().as_ref(), &header).await {
        Ok(Some(_)) => next.run(req).await,
        Ok(None) => fehler_antwort(StatusCode::FORBIDDEN, "Forbidden"),
        Err(e) => interner_fehler(e),
    }
}
