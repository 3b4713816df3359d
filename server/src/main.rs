//! Pfoertner Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use pfoertner_observability::{log_format_gueltig, log_level_gueltig, logging_initialisieren};
use pfoertner_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad =
        std::env::var("PFOERTNER_CONFIG").unwrap_or_else(|_| "config.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let config = ServerConfig::laden(&config_pfad)?;

    if !log_level_gueltig(&config.logging.level) {
        anyhow::bail!("ungueltiges Log-Level '{}'", config.logging.level);
    }
    if !log_format_gueltig(&config.logging.format) {
        anyhow::bail!("ungueltiges Log-Format '{}'", config.logging.format);
    }
    logging_initialisieren(&config.logging.level, &config.logging.format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "Pfoertner Server wird initialisiert"
    );

    let server = Server::neu(config);
    server.starten().await?;

    Ok(())
}
