//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod pool;
pub mod sessions;
pub mod users;

pub use pool::SqliteDb;
