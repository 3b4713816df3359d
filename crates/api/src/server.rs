//! Axum HTTP-Server fuer die Pfoertner-API

use std::net::SocketAddr;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{middleware::basic_gate, routes::router, ApiZustand};

/// HTTP-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct ApiServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
}

/// Axum HTTP-Server
pub struct ApiServer {
    konfig: ApiServerKonfig,
}

impl ApiServer {
    pub fn neu(konfig: ApiServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den HTTP-Server mit dem gegebenen Zustand
    pub async fn starten(self, zustand: ApiZustand) -> Result<()> {
        let cors = if self.konfig.cors_origins.is_empty() {
            CorsLayer::permissive()
        } else {
            let origins: Vec<HeaderValue> = self
                .konfig
                .cors_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(tower_http::cors::Any)
        };

        let app = router()
            // Basic-Auth-Gate als innersten Layer (laeuft vor den Handlern)
            .layer(middleware::from_fn_with_state(zustand.clone(), basic_gate))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(zustand);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "Pfoertner-API gestartet");

        axum::serve(listener, app).await?;
        Ok(())
    }
}
