//! Schwaerzung personenbezogener Felder in Log-Zeilen
//!
//! Reine String-Ersetzung ohne Zustand: Werte benannter Felder in Zeilen
//! der Form `name=wert<trenner>name=wert<trenner>...` werden durch einen
//! Ersatztext ersetzt. Unabhaengig von der Auth-Engine einsetzbar.

use regex::Regex;

/// Ersetzt die Werte der angegebenen Felder durch `ersatz`
///
/// `trenner` ist das Zeichen zwischen den `name=wert`-Paaren. Felder, die
/// in der Nachricht nicht vorkommen, bleiben ohne Wirkung.
pub fn felder_schwaerzen(
    felder: &[String],
    ersatz: &str,
    nachricht: &str,
    trenner: char,
) -> String {
    let mut ergebnis = nachricht.to_string();
    for feld in felder {
        let muster = format!(
            "{}=[^{}]*",
            regex::escape(feld),
            regex::escape(&trenner.to_string())
        );
        // Muster aus festem Feldnamen + escaptem Trenner ist immer gueltig
        if let Ok(re) = Regex::new(&muster) {
            ergebnis = re
                .replace_all(&ergebnis, format!("{feld}={ersatz}"))
                .into_owned();
        }
    }
    ergebnis
}
