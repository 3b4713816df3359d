//! Auth-Gate: Pfad-Ausnahmepruefung
//!
//! Entscheidet ob ein Request-Pfad Authentifizierung benoetigt. Ohne Pfad
//! oder ohne konfigurierte Ausnahmen ist keine Authentifizierung noetig;
//! sonst gilt: Auth erforderlich, ausser eine Ausnahme passt.
//!
//! Normalisierung: nachgestellte Schraegstriche werden vor dem Vergleich
//! sowohl vom Pfad als auch von Exakt-Eintraegen entfernt. Eintraege mit
//! abschliessendem `*` sind Praefix-Vergleiche auf dem normalisierten Pfad.

/// Prueft ob der Pfad Authentifizierung erfordert
///
/// Der erste passende Ausnahme-Eintrag gewinnt.
pub fn auth_erforderlich(pfad: Option<&str>, ausnahmen: Option<&[String]>) -> bool {
    let pfad = match pfad {
        Some(p) => p,
        None => return false,
    };
    let ausnahmen = match ausnahmen {
        Some(a) if !a.is_empty() => a,
        _ => return false,
    };

    let pfad = pfad.trim_end_matches('/');

    for ausnahme in ausnahmen {
        if let Some(praefix) = ausnahme.strip_suffix('*') {
            if pfad.starts_with(praefix) {
                return false;
            }
        } else if pfad == ausnahme.trim_end_matches('/') {
            return false;
        }
    }

    true
}
