//! Passwort-Hashing mit Argon2id
//!
//! Argon2id ist der empfohlene Algorithmus gemaess OWASP-Richtlinien.
//! Der gespeicherte Hash ist ein PHC-String inklusive Salt und Parametern;
//! die Verifikation laeuft in konstanter Zeit.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AuthError;

/// Argon2id-Parameter: 64 MiB Speicher, 3 Iterationen, 1 Thread
fn argon2_instanz() -> Argon2<'static> {
    let params = Params::new(64 * 1024, 3, 1, None).expect("Argon2-Parameter ungueltig");
    Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
}

/// Hasht ein Passwort mit Argon2id und einem zufaelligen Salt
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2_instanz()
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
///
/// `Ok(false)` bei falschem Passwort; `Err` nur wenn der gespeicherte
/// Hash selbst nicht geparst werden kann.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> Result<bool, AuthError> {
    let geparst = PasswordHash::new(hash)
        .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

    match argon2_instanz().verify_password(passwort.as_bytes(), &geparst) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
    }
}
