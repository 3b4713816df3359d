//! Datenbankmodelle fuer Pfoertner
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind reine Datenuebertragungsobjekte ohne Geschaeftslogik.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
///
/// `session_token` und `reset_token` sind optional: ein Benutzer ohne
/// `session_token` ist abgemeldet, ein Benutzer ohne `reset_token` hat
/// keinen laufenden Passwort-Reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub session_token: Option<String>,
    pub reset_token: Option<String>,
    pub session_created_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Daten zum partiellen Aktualisieren eines Benutzers
///
/// Die Token-Felder sind doppelt optional: `None` laesst das Feld
/// unveraendert, `Some(None)` loescht es, `Some(Some(..))` setzt es.
#[derive(Debug, Clone, Default)]
pub struct BenutzerUpdate {
    pub password_hash: Option<String>,
    pub session_token: Option<Option<String>>,
    pub reset_token: Option<Option<String>>,
    pub session_created_at: Option<Option<DateTime<Utc>>>,
}

// ---------------------------------------------------------------------------
// Persistente Sessions (zeitbegrenzte Variante)
// ---------------------------------------------------------------------------

/// Durabler Session-Eintrag, Schluessel ist die Session-ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
