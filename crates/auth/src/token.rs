//! Erzeugung opaker Tokens
//!
//! Session- und Reset-Tokens sind reine Zufallswerte ohne dekodierbare
//! Struktur: 32 Bytes aus dem CSPRNG, URL-sicher Base64-kodiert.

use rand::RngCore;

/// Generiert einen kryptografisch sicheren opaken Token
pub fn token_generieren() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}
