//! Zeitbegrenzte Session-Variante
//!
//! Sessions liegen hier nicht auf dem Benutzerdatensatz, sondern in einer
//! In-Memory-Zuordnung `session_id -> Eintrag`, optional durchgeschrieben
//! in eine durable Ablage. Pro Benutzer sind beliebig viele gleichzeitige
//! Sessions erlaubt.
//!
//! Der Ablauf wird lazy bei jedem Lookup gegen den Erstellzeitpunkt
//! geprueft; es gibt keinen Hintergrund-Task, und abgelaufene Eintraege
//! werden beim Lookup nicht entfernt.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use pfoertner_db::repository::{DbResult, SessionRepository};

use crate::error::AuthResult;
use crate::token::token_generieren;

/// Ein Eintrag der In-Memory-Zuordnung
#[derive(Debug, Clone)]
pub struct SessionEintrag {
    pub user_id: Uuid,
    pub erstellt_am: DateTime<Utc>,
}

/// Ablage-Platzhalter fuer die rein fluechtige Variante
#[derive(Debug, Default)]
pub struct OhneAblage;

impl SessionRepository for OhneAblage {
    async fn insert(&self, _: &str, _: Uuid, _: DateTime<Utc>) -> DbResult<()> {
        Ok(())
    }
    async fn get(&self, _: &str) -> DbResult<Option<pfoertner_db::models::SessionRecord>> {
        Ok(None)
    }
    async fn remove(&self, _: &str) -> DbResult<bool> {
        Ok(false)
    }
}

/// Verwaltung zeitbegrenzter Sessions
///
/// `dauer_sekunden <= 0` bedeutet: Sessions laufen nie ab.
pub struct SessionVerwaltung<S: SessionRepository = OhneAblage> {
    eintraege: RwLock<HashMap<String, SessionEintrag>>,
    dauer_sekunden: i64,
    ablage: Option<Arc<S>>,
}

impl SessionVerwaltung<OhneAblage> {
    /// Rein fluechtige Verwaltung ohne durable Ablage
    pub fn neu(dauer_sekunden: i64) -> Self {
        Self {
            eintraege: RwLock::new(HashMap::new()),
            dauer_sekunden,
            ablage: None,
        }
    }
}

impl<S: SessionRepository> SessionVerwaltung<S> {
    /// Verwaltung mit durabler Ablage: jede Erstellung und Zerstoerung
    /// wird sofort durchgeschrieben
    pub fn mit_ablage(dauer_sekunden: i64, ablage: Arc<S>) -> Self {
        Self {
            eintraege: RwLock::new(HashMap::new()),
            dauer_sekunden,
            ablage: Some(ablage),
        }
    }

    /// Erstellt eine neue Session und gibt die opake Session-ID zurueck
    pub async fn erstellen(&self, user_id: Uuid) -> AuthResult<String> {
        let session_id = token_generieren();
        let jetzt = Utc::now();

        self.eintraege.write().await.insert(
            session_id.clone(),
            SessionEintrag {
                user_id,
                erstellt_am: jetzt,
            },
        );

        if let Some(ablage) = &self.ablage {
            ablage.insert(&session_id, user_id, jetzt).await?;
        }

        tracing::debug!(user_id = %user_id, "Zeitbegrenzte Session erstellt");
        Ok(session_id)
    }

    /// Loest eine Session-ID zum Benutzer auf
    ///
    /// `Ok(None)` bei unbekannter ID oder abgelaufener Session. Die
    /// Ablaufpruefung laeuft bei jedem Aufruf; abgelaufene Eintraege
    /// bleiben in der Zuordnung stehen.
    pub async fn benutzer_fuer_session_id(&self, session_id: &str) -> AuthResult<Option<Uuid>> {
        if session_id.is_empty() {
            return Ok(None);
        }

        if let Some(eintrag) = self.eintraege.read().await.get(session_id) {
            return Ok(self.ist_live(eintrag.erstellt_am).then_some(eintrag.user_id));
        }

        // In-Memory-Fehltreffer: durable Ablage befragen (z.B. nach Neustart)
        if let Some(ablage) = &self.ablage {
            if let Some(record) = ablage.get(session_id).await? {
                return Ok(self.ist_live(record.created_at).then_some(record.user_id));
            }
        }

        Ok(None)
    }

    /// Zerstoert eine Session
    ///
    /// Gibt `false` ohne Seiteneffekte zurueck wenn die ID nicht aufloesbar
    /// ist (unbekannt oder abgelaufen); sonst wird der Eintrag entfernt.
    pub async fn beenden(&self, session_id: &str) -> AuthResult<bool> {
        if self.benutzer_fuer_session_id(session_id).await?.is_none() {
            return Ok(false);
        }

        self.eintraege.write().await.remove(session_id);
        if let Some(ablage) = &self.ablage {
            ablage.remove(session_id).await?;
        }

        tracing::debug!("Zeitbegrenzte Session zerstoert");
        Ok(true)
    }

    fn ist_live(&self, erstellt_am: DateTime<Utc>) -> bool {
        if self.dauer_sekunden <= 0 {
            return true;
        }
        // Nicht darstellbare Dauern oder Ablaufzeitpunkte jenseits des
        // Zeitbereichs bedeuten: die Session laeuft nie ab.
        match Duration::try_seconds(self.dauer_sekunden)
            .and_then(|dauer| erstellt_am.checked_add_signed(dauer))
        {
            Some(ablauf) => Utc::now() < ablauf,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestSessionRepo;

    #[tokio::test]
    async fn erstellen_und_aufloesen() {
        let sv = SessionVerwaltung::neu(60);
        let user_id = Uuid::new_v4();

        let id = sv.erstellen(user_id).await.unwrap();
        assert_eq!(
            sv.benutzer_fuer_session_id(&id).await.unwrap(),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn mehrere_sessions_pro_benutzer() {
        let sv = SessionVerwaltung::neu(60);
        let user_id = Uuid::new_v4();

        let s1 = sv.erstellen(user_id).await.unwrap();
        let s2 = sv.erstellen(user_id).await.unwrap();
        assert_ne!(s1, s2);

        // Beide Sessions bleiben parallel gueltig (kein Ein-Token-Modell)
        assert!(sv.benutzer_fuer_session_id(&s1).await.unwrap().is_some());
        assert!(sv.benutzer_fuer_session_id(&s2).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unbekannte_und_leere_id() {
        let sv = SessionVerwaltung::neu(60);
        assert!(sv.benutzer_fuer_session_id("fremd").await.unwrap().is_none());
        assert!(sv.benutzer_fuer_session_id("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn abgelaufene_session_gibt_none_bleibt_aber_stehen() {
        let sv = SessionVerwaltung::neu(5);
        let user_id = Uuid::new_v4();

        // Eintrag rueckdatiert jenseits der Dauer
        sv.eintraege.write().await.insert(
            "alt".into(),
            SessionEintrag {
                user_id,
                erstellt_am: Utc::now() - Duration::seconds(6),
            },
        );

        assert!(sv.benutzer_fuer_session_id("alt").await.unwrap().is_none());
        // Lazy Expiry: der Eintrag wird beim Lookup nicht geloescht
        assert!(sv.eintraege.read().await.contains_key("alt"));
    }

    #[tokio::test]
    async fn ablauf_genau_an_der_grenze() {
        let sv = SessionVerwaltung::neu(5);
        let user_id = Uuid::new_v4();

        sv.eintraege.write().await.insert(
            "grenze".into(),
            SessionEintrag {
                user_id,
                erstellt_am: Utc::now() - Duration::seconds(5),
            },
        );

        // t >= D ist abgelaufen
        assert!(sv
            .benutzer_fuer_session_id("grenze")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn dauer_null_laeuft_nie_ab() {
        let sv = SessionVerwaltung::neu(0);
        let user_id = Uuid::new_v4();

        sv.eintraege.write().await.insert(
            "ewig".into(),
            SessionEintrag {
                user_id,
                erstellt_am: Utc::now() - Duration::days(365),
            },
        );

        assert_eq!(
            sv.benutzer_fuer_session_id("ewig").await.unwrap(),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn extreme_dauer_laeuft_nie_ab() {
        // Eine nicht als Duration darstellbare Dauer darf den Lookup
        // nicht zum Absturz bringen
        let sv = SessionVerwaltung::neu(i64::MAX);
        let user_id = Uuid::new_v4();

        sv.eintraege.write().await.insert(
            "riesig".into(),
            SessionEintrag {
                user_id,
                erstellt_am: Utc::now() - Duration::days(30),
            },
        );

        assert_eq!(
            sv.benutzer_fuer_session_id("riesig").await.unwrap(),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn beenden_entfernt_den_eintrag() {
        let sv = SessionVerwaltung::neu(60);
        let user_id = Uuid::new_v4();
        let id = sv.erstellen(user_id).await.unwrap();

        assert!(sv.beenden(&id).await.unwrap());
        assert!(sv.benutzer_fuer_session_id(&id).await.unwrap().is_none());

        // Zweites Beenden schlaegt ohne Seiteneffekte fehl
        assert!(!sv.beenden(&id).await.unwrap());
    }

    #[tokio::test]
    async fn beenden_abgelaufener_session_gibt_false() {
        let sv = SessionVerwaltung::neu(5);

        sv.eintraege.write().await.insert(
            "alt".into(),
            SessionEintrag {
                user_id: Uuid::new_v4(),
                erstellt_am: Utc::now() - Duration::seconds(10),
            },
        );

        assert!(!sv.beenden("alt").await.unwrap());
        // Kein Seiteneffekt: Eintrag bleibt
        assert!(sv.eintraege.read().await.contains_key("alt"));
    }

    #[tokio::test]
    async fn durable_ablage_wird_durchgeschrieben() {
        let ablage = Arc::new(TestSessionRepo::default());
        let sv = SessionVerwaltung::mit_ablage(60, Arc::clone(&ablage));
        let user_id = Uuid::new_v4();

        let id = sv.erstellen(user_id).await.unwrap();
        assert_eq!(ablage.eintraege.lock().unwrap().len(), 1);

        assert!(sv.beenden(&id).await.unwrap());
        assert!(ablage.eintraege.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn durable_ablage_ueberlebt_speicherverlust() {
        let ablage = Arc::new(TestSessionRepo::default());
        let user_id = Uuid::new_v4();

        let id = {
            let sv = SessionVerwaltung::mit_ablage(60, Arc::clone(&ablage));
            sv.erstellen(user_id).await.unwrap()
        };

        // Neue Verwaltung mit leerer In-Memory-Zuordnung, gleiche Ablage
        let sv = SessionVerwaltung::mit_ablage(60, Arc::clone(&ablage));
        assert_eq!(
            sv.benutzer_fuer_session_id(&id).await.unwrap(),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn durabler_eintrag_laeuft_lesend_ab() {
        let ablage = Arc::new(TestSessionRepo::default());
        let user_id = Uuid::new_v4();
        ablage
            .insert("alt", user_id, Utc::now() - Duration::seconds(10))
            .await
            .unwrap();

        let sv = SessionVerwaltung::mit_ablage(5, Arc::clone(&ablage));
        assert!(sv.benutzer_fuer_session_id("alt").await.unwrap().is_none());
        // Durabilitaet erzwingt keinen Aufraeum-Lauf
        assert_eq!(ablage.eintraege.lock().unwrap().len(), 1);
    }
}
