//! pfoertner-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern fuer den Credential Store
//! und die durablen Session-Eintraege bereit. Die Standard-Implementierung
//! basiert auf SQLite (sqlx, WAL-Modus, eingebettete Migrationen).

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use repository::{DatabaseConfig, DbResult, SessionRepository, UserRepository};
pub use sqlite::SqliteDb;
