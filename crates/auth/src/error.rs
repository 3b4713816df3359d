//! Fehlertypen fuer den Auth-Dienst

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Dienst
///
/// Fachliche Lookup-Fehlschlaege ("kein Treffer") werden bewusst NICHT
/// hier abgebildet, sondern als `Ok(None)`/`Ok(false)` gemeldet, damit
/// Aufrufer die Existenz eines Kontos nicht unterscheiden koennen.
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Registrierung ---
    #[error("E-Mail bereits registriert: {0}")]
    BereitsRegistriert(String),

    // --- Passwort-Reset ---
    #[error("Benutzer nicht gefunden: {0}")]
    UnbekannterBenutzer(String),

    #[error("Reset-Token passt nicht zur E-Mail")]
    ResetUngueltig,

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] pfoertner_db::DbError),
}

/// Result-Alias fuer den Auth-Dienst
pub type AuthResult<T> = Result<T, AuthError>;
