//! pfoertner-observability – Logging-Setup und PII-Schwaerzung

pub mod logging;
pub mod redaktion;

pub use logging::{log_format_gueltig, log_level_gueltig, logging_initialisieren};
pub use redaktion::felder_schwaerzen;
