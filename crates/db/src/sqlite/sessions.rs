//! SQLite-Implementierung des SessionRepository
//!
//! Jede Session-Erstellung und -Zerstoerung wird direkt durchgeschrieben.
//! Abgelaufene Eintraege werden NICHT hier entfernt; der Ablauf wird
//! lesend in der Auth-Schicht gegen `created_at` geprueft.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::SessionRecord;
use crate::repository::{DbResult, SessionRepository};
use crate::sqlite::pool::SqliteDb;

impl SessionRepository for SqliteDb {
    async fn insert(
        &self,
        session_id: &str,
        user_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query("INSERT OR REPLACE INTO sessions (session_id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(session_id)
            .bind(user_id.to_string())
            .bind(created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, session_id: &str) -> DbResult<Option<SessionRecord>> {
        let row = sqlx::query(
            "SELECT session_id, user_id, created_at FROM sessions WHERE session_id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    async fn remove(&self, session_id: &str) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> DbResult<SessionRecord> {
    use sqlx::Row as _;

    let user_id_str: String = row.try_get("user_id")?;
    let user_id = Uuid::parse_str(&user_id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{user_id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    Ok(SessionRecord {
        session_id: row.try_get("session_id")?,
        user_id,
        created_at,
    })
}
