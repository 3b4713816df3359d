//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt den Auth-Dienst von der konkreten
//! Datenbank-Implementierung. Die SQLite-Implementierung liegt in
//! `sqlite/`, Tests nutzen In-Memory-Varianten.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{BenutzerRecord, BenutzerUpdate, NeuerBenutzer, SessionRecord};

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://pfoertner.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pfoertner.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe (Credential Store)
#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync {
    /// Einen neuen Benutzer anlegen
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>>;

    /// Den ersten Benutzer mit der angegebenen E-Mail laden
    ///
    /// E-Mail-Eindeutigkeit wird nicht per Constraint erzwungen; bei
    /// Duplikaten gewinnt der aelteste Eintrag.
    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Alle Benutzer mit der angegebenen E-Mail laden (Basic-Auth-Pfad)
    async fn list_by_email(&self, email: &str) -> DbResult<Vec<BenutzerRecord>>;

    /// Einen Benutzer anhand seines gespeicherten Session-Tokens laden
    async fn get_by_session_token(&self, token: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer laden, bei dem E-Mail UND Reset-Token exakt passen
    async fn get_by_email_und_reset_token(
        &self,
        email: &str,
        reset_token: &str,
    ) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer partiell aktualisieren
    async fn update(&self, id: Uuid, data: BenutzerUpdate) -> DbResult<BenutzerRecord>;
}

/// Repository fuer durable Session-Eintraege (zeitbegrenzte Variante)
#[allow(async_fn_in_trait)]
pub trait SessionRepository: Send + Sync {
    /// Einen Session-Eintrag schreiben
    async fn insert(&self, session_id: &str, user_id: Uuid, created_at: DateTime<Utc>)
        -> DbResult<()>;

    /// Einen Session-Eintrag anhand der Session-ID laden
    async fn get(&self, session_id: &str) -> DbResult<Option<SessionRecord>>;

    /// Einen Session-Eintrag entfernen, gibt true zurueck wenn er existierte
    async fn remove(&self, session_id: &str) -> DbResult<bool>;
}
