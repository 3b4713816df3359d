//! In-Memory-Repositories fuer Tests

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use pfoertner_db::{
    models::{BenutzerRecord, BenutzerUpdate, NeuerBenutzer, SessionRecord},
    repository::{DbResult, SessionRepository, UserRepository},
    DbError,
};

/// Minimaler In-Memory UserRepository fuer Tests
#[derive(Default)]
pub(crate) struct TestUserRepo {
    benutzer: Mutex<Vec<BenutzerRecord>>,
}

impl UserRepository for TestUserRepo {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let record = BenutzerRecord {
            id: Uuid::new_v4(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            session_token: None,
            reset_token: None,
            session_created_at: None,
            created_at: Utc::now(),
        };
        self.benutzer.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
        Ok(self
            .benutzer
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        Ok(self
            .benutzer
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.email == email)
            .cloned())
    }

    async fn list_by_email(&self, email: &str) -> DbResult<Vec<BenutzerRecord>> {
        Ok(self
            .benutzer
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.email == email)
            .cloned()
            .collect())
    }

    async fn get_by_session_token(&self, token: &str) -> DbResult<Option<BenutzerRecord>> {
        Ok(self
            .benutzer
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.session_token.as_deref() == Some(token))
            .cloned())
    }

    async fn get_by_email_und_reset_token(
        &self,
        email: &str,
        reset_token: &str,
    ) -> DbResult<Option<BenutzerRecord>> {
        Ok(self
            .benutzer
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.email == email && b.reset_token.as_deref() == Some(reset_token))
            .cloned())
    }

    async fn update(&self, id: Uuid, data: BenutzerUpdate) -> DbResult<BenutzerRecord> {
        let mut benutzer = self.benutzer.lock().unwrap();
        let b = benutzer
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DbError::nicht_gefunden(id.to_string()))?;
        if let Some(hash) = data.password_hash {
            b.password_hash = hash;
        }
        if let Some(token) = data.session_token {
            b.session_token = token;
        }
        if let Some(token) = data.reset_token {
            b.reset_token = token;
        }
        if let Some(ts) = data.session_created_at {
            b.session_created_at = ts;
        }
        Ok(b.clone())
    }
}

/// Minimaler In-Memory SessionRepository fuer Tests der persistenten Variante
#[derive(Default)]
pub(crate) struct TestSessionRepo {
    pub(crate) eintraege: Mutex<Vec<SessionRecord>>,
}

impl SessionRepository for TestSessionRepo {
    async fn insert(
        &self,
        session_id: &str,
        user_id: Uuid,
        created_at: chrono::DateTime<Utc>,
    ) -> DbResult<()> {
        let mut eintraege = self.eintraege.lock().unwrap();
        eintraege.retain(|e| e.session_id != session_id);
        eintraege.push(SessionRecord {
            session_id: session_id.to_string(),
            user_id,
            created_at,
        });
        Ok(())
    }

    async fn get(&self, session_id: &str) -> DbResult<Option<SessionRecord>> {
        Ok(self
            .eintraege
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.session_id == session_id)
            .cloned())
    }

    async fn remove(&self, session_id: &str) -> DbResult<bool> {
        let mut eintraege = self.eintraege.lock().unwrap();
        let vorher = eintraege.len();
        eintraege.retain(|e| e.session_id != session_id);
        Ok(eintraege.len() < vorher)
    }
}
