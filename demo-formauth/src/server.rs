use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Certificate and key for the optional HTTPS listener
pub(crate) struct TlsPaths {
    pub(crate) cert: PathBuf,
    pub(crate) key: PathBuf,
}

pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<io::Result<()>> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("HTTP server listening on {}", addr);
        axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "HTTP server stopped"))
    })
}

pub(crate) async fn spawn_https_server(
    port: u16,
    app: Router,
    tls: TlsPaths,
) -> io::Result<JoinHandle<io::Result<()>>> {
    let config = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = %e,
                cert = %tls.cert.display(),
                key = %tls.key.display(),
                "Failed to load TLS certificates"
            )
        })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("HTTPS server listening on {}", addr);
    Ok(tokio::spawn(async move {
        axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "HTTPS server stopped"))
    }))
}

pub(crate) fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("formauth_axum=trace,formauth=trace,{app_name}=trace,info").into()
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = app_name;
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(debug_assertions)]
    tracing::info!("Debug build: detailed logs enabled by default");
    tracing::info!("Set RUST_LOG to change verbosity, e.g. RUST_LOG=debug ./demo-formauth");
}
