//! Basic-Auth-Dekoder
//!
//! Zerlegt einen `Authorization: Basic <base64>`-Header in E-Mail und
//! Passwort und loest sie gegen den Credential Store auf. Jede Stufe
//! gibt bei fehlerhafter Eingabe `None` zurueck statt zu fehlschlagen;
//! die Kette bricht beim ersten `None` ab.

use base64::Engine as _;

use pfoertner_db::{models::BenutzerRecord, repository::UserRepository};

use crate::error::AuthResult;
use crate::password::passwort_verifizieren;

/// Stufe 1: entfernt das literale Praefix `"Basic "` (inklusive Leerzeichen)
pub fn basic_token_extrahieren(header: &str) -> Option<&str> {
    header.strip_prefix("Basic ")
}

/// Stufe 2: dekodiert den Base64-Teil zu UTF-8-Text
///
/// `None` bei ungueltigem Alphabet, kaputtem Padding oder ungueltigem UTF-8.
pub fn basic_dekodieren(token: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(token).ok()?;
    String::from_utf8(bytes).ok()
}

/// Stufe 3: trennt am ERSTEN `:` in (E-Mail, Passwort)
///
/// `None` wenn kein `:` vorhanden ist; das Passwort darf weitere `:` enthalten.
pub fn anmeldedaten_trennen(dekodiert: &str) -> Option<(&str, &str)> {
    dekodiert.split_once(':')
}

/// Stufe 4: loest (E-Mail, Passwort) gegen den Credential Store auf
///
/// Prueft das Passwort gegen jeden Datensatz mit exakt passender E-Mail;
/// der erste verifizierte Treffer gewinnt. Unlesbare gespeicherte Hashes
/// werden uebersprungen.
pub async fn benutzer_aus_anmeldedaten<U: UserRepository>(
    repo: &U,
    email: &str,
    passwort: &str,
) -> AuthResult<Option<BenutzerRecord>> {
    for benutzer in repo.list_by_email(email).await? {
        if matches!(
            passwort_verifizieren(passwort, &benutzer.password_hash),
            Ok(true)
        ) {
            return Ok(Some(benutzer));
        }
    }
    Ok(None)
}

/// Vollstaendige Pipeline: Header -> verifizierter Benutzer
pub async fn benutzer_aus_basic_header<U: UserRepository>(
    repo: &U,
    header: &str,
) -> AuthResult<Option<BenutzerRecord>> {
    let token = match basic_token_extrahieren(header) {
        Some(t) => t,
        None => return Ok(None),
    };
    let dekodiert = match basic_dekodieren(token) {
        Some(d) => d,
        None => return Ok(None),
    };
    let (email, passwort) = match anmeldedaten_trennen(&dekodiert) {
        Some(paar) => paar,
        None => return Ok(None),
    };
    benutzer_aus_anmeldedaten(repo, email, passwort).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::passwort_hashen;
    use crate::test_support::TestUserRepo;
    use pfoertner_db::models::NeuerBenutzer;

    // base64("wendel:clevererpassword")
    const WENDEL_HEADER: &str = "Basic d2VuZGVsOmNsZXZlcmVycGFzc3dvcmQ=";

    #[test]
    fn praefix_ist_leerzeichen_sensitiv() {
        assert_eq!(
            basic_token_extrahieren("Basic abc123"),
            Some("abc123")
        );
        assert!(basic_token_extrahieren("Basicabc123").is_none());
        assert!(basic_token_extrahieren("basic abc123").is_none());
        assert!(basic_token_extrahieren("Bearer abc123").is_none());
    }

    #[test]
    fn dekodieren_gueltiges_base64() {
        assert_eq!(
            basic_dekodieren("d2VuZGVsOmNsZXZlcmVycGFzc3dvcmQ=").as_deref(),
            Some("wendel:clevererpassword")
        );
    }

    #[test]
    fn dekodieren_ungueltiges_base64() {
        assert!(basic_dekodieren("kein base64 !!!").is_none());
        // Kaputtes Padding
        assert!(basic_dekodieren("d2VuZGVs=").is_none());
        // Gueltiges Base64, aber kein UTF-8
        assert!(basic_dekodieren("/w==").is_none());
    }

    #[test]
    fn trennen_am_ersten_doppelpunkt() {
        assert_eq!(
            anmeldedaten_trennen("wendel:clevererpassword"),
            Some(("wendel", "clevererpassword"))
        );
        // Passwort mit Doppelpunkt bleibt intakt
        assert_eq!(
            anmeldedaten_trennen("a@x.io:pass:wort"),
            Some(("a@x.io", "pass:wort"))
        );
        assert!(anmeldedaten_trennen("ohne_doppelpunkt").is_none());
    }

    async fn repo_mit(email: &str, passwort: &str) -> TestUserRepo {
        let repo = TestUserRepo::default();
        let hash = passwort_hashen(passwort).unwrap();
        repo.create(NeuerBenutzer {
            email,
            password_hash: &hash,
        })
        .await
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn pipeline_loest_benutzer_auf() {
        let repo = repo_mit("wendel", "clevererpassword").await;

        let benutzer = benutzer_aus_basic_header(&repo, WENDEL_HEADER)
            .await
            .unwrap()
            .expect("Benutzer erwartet");
        assert_eq!(benutzer.email, "wendel");
    }

    #[tokio::test]
    async fn pipeline_faellt_frueh_durch() {
        let repo = repo_mit("wendel", "clevererpassword").await;

        // Ohne Praefix
        let ohne_praefix =
            benutzer_aus_basic_header(&repo, "d2VuZGVsOmNsZXZlcmVycGFzc3dvcmQ=").await;
        assert!(ohne_praefix.unwrap().is_none());

        // Ungueltiges Base64
        let kaputt = benutzer_aus_basic_header(&repo, "Basic %%%").await;
        assert!(kaputt.unwrap().is_none());
    }

    #[tokio::test]
    async fn falsches_passwort_gibt_none() {
        let repo = repo_mit("wendel", "anderespasswort").await;
        assert!(benutzer_aus_basic_header(&repo, WENDEL_HEADER)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn erster_verifizierter_treffer_gewinnt() {
        let repo = TestUserRepo::default();
        // Zwei Datensaetze mit derselben E-Mail, unterschiedliche Passwoerter
        let hash1 = passwort_hashen("falsch").unwrap();
        repo.create(NeuerBenutzer {
            email: "wendel",
            password_hash: &hash1,
        })
        .await
        .unwrap();
        let hash2 = passwort_hashen("clevererpassword").unwrap();
        let zweiter = repo
            .create(NeuerBenutzer {
                email: "wendel",
                password_hash: &hash2,
            })
            .await
            .unwrap();

        let gefunden = benutzer_aus_basic_header(&repo, WENDEL_HEADER)
            .await
            .unwrap()
            .expect("Benutzer erwartet");
        assert_eq!(gefunden.id, zweiter.id);
    }

    #[tokio::test]
    async fn kaputter_hash_wird_uebersprungen() {
        let repo = TestUserRepo::default();
        repo.create(NeuerBenutzer {
            email: "wendel",
            password_hash: "kein_phc_string",
        })
        .await
        .unwrap();

        assert!(benutzer_aus_basic_header(&repo, WENDEL_HEADER)
            .await
            .unwrap()
            .is_none());
    }
}
