//! SQLite-Implementierung des UserRepository

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{BenutzerRecord, BenutzerUpdate, NeuerBenutzer};
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::pool::SqliteDb;

const BENUTZER_SPALTEN: &str =
    "id, email, password_hash, session_token, reset_token, session_created_at, created_at";

impl UserRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO benutzer (id, email, password_hash, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.email)
        .bind(data.password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(BenutzerRecord {
            id,
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            session_token: None,
            reset_token: None,
            session_created_at: None,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!("SELECT {BENUTZER_SPALTEN} FROM benutzer WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM benutzer WHERE email = ? ORDER BY created_at LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn list_by_email(&self, email: &str) -> DbResult<Vec<BenutzerRecord>> {
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM benutzer WHERE email = ? ORDER BY created_at"
        );
        let rows = sqlx::query(&sql).bind(email).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_benutzer).collect()
    }

    async fn get_by_session_token(&self, token: &str) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!("SELECT {BENUTZER_SPALTEN} FROM benutzer WHERE session_token = ?");
        let row = sqlx::query(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_email_und_reset_token(
        &self,
        email: &str,
        reset_token: &str,
    ) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM benutzer WHERE email = ? AND reset_token = ?"
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .bind(reset_token)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn update(&self, id: Uuid, data: BenutzerUpdate) -> DbResult<BenutzerRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.password_hash.is_some() {
            sets.push("password_hash = ?");
        }
        if data.session_token.is_some() {
            sets.push("session_token = ?");
        }
        if data.reset_token.is_some() {
            sets.push("reset_token = ?");
        }
        if data.session_created_at.is_some() {
            sets.push("session_created_at = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Benutzer {id}")));
        }

        let sql = format!("UPDATE benutzer SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.password_hash {
            q = q.bind(v);
        }
        if let Some(ref v) = data.session_token {
            q = q.bind(v.as_deref());
        }
        if let Some(ref v) = data.reset_token {
            q = q.bind(v.as_deref());
        }
        if let Some(ref v) = data.session_created_at {
            q = q.bind(v.map(|t| t.to_rfc3339()));
        }
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Benutzer {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Benutzer nach Update nicht gefunden"))
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let session_created_at: Option<String> = row.try_get("session_created_at")?;
    let session_created_at = session_created_at
        .as_deref()
        .map(|s| {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DbError::intern(format!("Ungueltige session_created_at '{s}': {e}")))
        })
        .transpose()?;

    Ok(BenutzerRecord {
        id,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        session_token: row.try_get("session_token")?,
        reset_token: row.try_get("reset_token")?,
        session_created_at,
        created_at,
    })
}
