//! pfoertner-api – HTTP-Schicht
//!
//! Uebersetzt HTTP-Requests in Aufrufe der Auth-Engine und deren
//! Ergebnisse in Statuscodes. Die Engine wird als expliziter Zustand
//! beim Router-Bau injiziert, nicht als globaler Singleton gehalten.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

use std::sync::Arc;

use pfoertner_auth::{AuthDienst, SessionVerwaltung};
use pfoertner_db::SqliteDb;

/// Axum-State fuer die Pfoertner-API
#[derive(Clone)]
pub struct ApiZustand {
    /// Auth-Engine (Ein-Token-Modell auf dem Benutzerdatensatz)
    pub auth: Arc<AuthDienst<SqliteDb>>,
    /// Zeitbegrenzte Session-Variante mit durabler Ablage
    pub sessions: Arc<SessionVerwaltung<SqliteDb>>,
    /// Cookie-Name fuer die zeitbegrenzte Variante (konfigurierbar)
    pub session_cookie_name: String,
    /// Pfad-Ausnahmen fuer das Basic-Auth-Gate; leer = Gate inaktiv
    pub gate_ausnahmen: Vec<String>,
}

pub use routes::router;
pub use server::{ApiServer, ApiServerKonfig};
