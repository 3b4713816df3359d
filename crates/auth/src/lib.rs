//! pfoertner-auth – Auth-Engine
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Erzeugung opaker Session- und Reset-Tokens
//! - AuthDienst (Registrierung, Anmeldepruefung, Session-Lebenszyklus,
//!   Passwort-Reset mit Einmal-Token)
//! - Zeitbegrenzte Session-Variante (in-memory, optional durabel)
//! - Basic-Auth-Dekoder (`Authorization: Basic`)
//! - Auth-Gate mit Pfad-Ausnahmen

pub mod basic;
pub mod error;
pub mod gate;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use gate::auth_erforderlich;
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::AuthDienst;
pub use session::{OhneAblage, SessionEintrag, SessionVerwaltung};
pub use token::token_generieren;
