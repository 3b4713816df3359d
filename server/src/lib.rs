//! pfoertner-server – Bibliotheks-Root
//!
//! Deklariert die Server-Module und stellt den oeffentlichen
//! Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use pfoertner_api::{ApiServer, ApiServerKonfig, ApiZustand};
use pfoertner_auth::{AuthDienst, SessionVerwaltung};
use pfoertner_db::{DatabaseConfig, SqliteDb};
use pfoertner_observability::felder_schwaerzen;

use config::ServerConfig;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet den Server und laeuft bis zum Prozessende
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen (inkl. Migrationen)
    /// 2. Auth-Engine und Session-Verwaltung aufbauen
    /// 3. REST-API starten
    pub async fn starten(self) -> Result<()> {
        // Verbindungs-URLs koennen Zugangsdaten enthalten
        let url_geschwaerzt = felder_schwaerzen(
            &self.config.schwaerzung.felder,
            &self.config.schwaerzung.ersatz,
            &format!("url={}", self.config.datenbank.url),
            ';',
        );
        tracing::info!(datenbank = %url_geschwaerzt, "Datenbankverbindung wird hergestellt");

        let db = SqliteDb::oeffnen(&DatabaseConfig {
            url: self.config.datenbank.url.clone(),
            max_verbindungen: self.config.datenbank.max_verbindungen,
            sqlite_wal: self.config.datenbank.wal,
        })
        .await?;
        let db = Arc::new(db);

        let auth = Arc::new(AuthDienst::neu(db.clone()));
        let sessions = Arc::new(SessionVerwaltung::mit_ablage(
            self.config.session.dauer_sekunden,
            db.clone(),
        ));

        let zustand = ApiZustand {
            auth,
            sessions,
            session_cookie_name: self.config.session.cookie_name.clone(),
            gate_ausnahmen: self.config.gate.ausnahmen.clone(),
        };

        let bind_addr = self
            .config
            .api_bind_adresse()
            .parse()
            .with_context(|| format!("ungueltige Bind-Adresse '{}'", self.config.api_bind_adresse()))?;

        let api = ApiServer::neu(ApiServerKonfig {
            bind_addr,
            cors_origins: self.config.api.cors_origins.clone(),
        });
        api.starten(zustand).await
    }
}
