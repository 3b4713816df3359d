//! Route-Definitionen fuer die Pfoertner-API

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, ApiZustand};

/// Erstellt den vollstaendigen Router
pub fn router() -> Router<ApiZustand> {
    Router::new()
        // Index
        .route("/", get(handlers::index))
        // Registrierung
        .route("/users", post(handlers::benutzer::post_users))
        // Login / Logout / Profil (Ein-Token-Modell)
        .route(
            "/sessions",
            post(handlers::sessions::post_sessions).delete(handlers::sessions::delete_sessions),
        )
        .route("/profile", get(handlers::sessions::get_profile))
        // Passwort-Reset
        .route(
            "/reset_password",
            post(handlers::reset::post_reset_password).put(handlers::reset::put_reset_password),
        )
        // Zeitbegrenzte Session-Variante
        .route(
            "/auth_session/login",
            post(handlers::session_auth::post_login),
        )
        .route(
            "/auth_session/logout",
            delete(handlers::session_auth::delete_logout),
        )
}
