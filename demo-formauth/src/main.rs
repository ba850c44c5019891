use std::sync::Arc;

use dotenvy::dotenv;

use formauth_axum::{AuthConfig, AuthContext, formauth_router};

mod server;

use crate::server::{TlsPaths, init_tracing, spawn_http_server, spawn_https_server};

const DEFAULT_HTTP_PORT: u16 = 3001;

fn port_from_env(name: &str) -> Result<Option<u16>, Box<dyn std::error::Error>> {
    match std::env::var(name) {
        Ok(v) => Ok(Some(
            v.parse()
                .map_err(|e| format!("Invalid value for {name}: '{v}' ({e})"))?,
        )),
        Err(_) => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // rustls needs a process-level CryptoProvider before any TLS config is built
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install default CryptoProvider")?;

    dotenv().ok();
    init_tracing("demo_formauth");

    let config = AuthConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");
    let ctx = Arc::new(AuthContext::new(&config).await?);

    let app = formauth_router(ctx);

    let http_port = port_from_env("PORT")?.unwrap_or(DEFAULT_HTTP_PORT);
    let http_server = spawn_http_server(http_port, app.clone());

    let tls = match (
        std::env::var("TLS_CERT_PATH"),
        std::env::var("TLS_KEY_PATH"),
    ) {
        (Ok(cert), Ok(key)) => Some(TlsPaths {
            cert: cert.into(),
            key: key.into(),
        }),
        _ => None,
    };

    match (port_from_env("PORT_HTTPS")?, tls) {
        (Some(https_port), Some(tls)) => {
            let https_server = spawn_https_server(https_port, app, tls).await?;
            let (http, https) = tokio::try_join!(http_server, https_server)?;
            http?;
            https?;
        }
        (Some(_), None) => {
            tracing::warn!("PORT_HTTPS is set but TLS_CERT_PATH or TLS_KEY_PATH is missing");
            http_server.await??;
        }
        _ => http_server.await??,
    }

    Ok(())
}
