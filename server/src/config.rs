//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use serde::{Deserialize, Serialize};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ServerConfig {
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// HTTP-API-Einstellungen
    pub api: ApiEinstellungen,
    /// Einstellungen der zeitbegrenzten Session-Variante
    pub session: SessionEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// PII-Schwaerzung in Logzeilen
    pub schwaerzung: SchwaerzungEinstellungen,
    /// Pfad-Ausnahmen fuer das Basic-Auth-Gate
    pub gate: GateEinstellungen,
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://pfoertner.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// HTTP-API-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEinstellungen {
    /// Bind-Adresse fuer die REST-API
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub port: u16,
    /// CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for ApiEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 5000,
            cors_origins: vec![],
        }
    }
}

/// Einstellungen der zeitbegrenzten Session-Variante
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionEinstellungen {
    /// Cookie-Name fuer die Session-ID
    pub cookie_name: String,
    /// Session-Dauer in Sekunden; 0 oder negativ = Sessions laufen nie ab
    pub dauer_sekunden: i64,
}

impl Default for SessionEinstellungen {
    fn default() -> Self {
        Self {
            cookie_name: "_my_session_id".into(),
            dauer_sekunden: 0,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// PII-Schwaerzung in Logzeilen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchwaerzungEinstellungen {
    /// Feldnamen, deren Werte in Logzeilen ersetzt werden
    pub felder: Vec<String>,
    /// Ersatztext
    pub ersatz: String,
}

impl Default for SchwaerzungEinstellungen {
    fn default() -> Self {
        Self {
            felder: ["name", "email", "phone", "ssn", "password"]
                .map(String::from)
                .to_vec(),
            ersatz: "***".into(),
        }
    }
}

/// Pfad-Ausnahmen fuer das Basic-Auth-Gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GateEinstellungen {
    /// Pfade ohne Auth-Pflicht; leere Liste = Gate inaktiv
    pub ausnahmen: Vec<String>,
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Gibt die vollstaendige Bind-Adresse der REST-API zurueck
    pub fn api_bind_adresse(&self) -> String {
        format!("{}:{}", self.api.bind_adresse, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.datenbank.max_verbindungen, 5);
        assert_eq!(cfg.api.port, 5000);
        assert_eq!(cfg.session.cookie_name, "_my_session_id");
        assert_eq!(cfg.session.dauer_sekunden, 0);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.schwaerzung.felder.contains(&"password".to_string()));
        assert!(cfg.gate.ausnahmen.is_empty());
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.api_bind_adresse(), "0.0.0.0:5000");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [api]
            port = 8080

            [session]
            cookie_name = "sitzung"
            dauer_sekunden = 60

            [gate]
            ausnahmen = ["/api/v1/status/", "/api/v1/unauthorized/"]
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.api.port, 8080);
        assert_eq!(cfg.session.cookie_name, "sitzung");
        assert_eq!(cfg.session.dauer_sekunden, 60);
        assert_eq!(cfg.gate.ausnahmen.len(), 2);
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.api.bind_adresse, "0.0.0.0");
        assert_eq!(cfg.datenbank.url, "sqlite://pfoertner.db");
    }
}
