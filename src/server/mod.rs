pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use crate::checker::BatchChecker;
use crate::config::Config;
use crate::error::{CheckerError, Result};
use crate::provider::HttpEligibilityClient;

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<BatchChecker>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/api/check", post(routes::check))
        .route("/api/export", get(routes::export))
        .with_state(state)
}

/// Start the checking service and block until shutdown.
pub async fn serve(config: &Config, listen_override: Option<String>) -> Result<()> {
    let provider = Arc::new(HttpEligibilityClient::new(config.provider.clone())?);
    let checker = Arc::new(BatchChecker::new(provider, &config.checker));
    let app = router(AppState { checker });

    let listen = listen_override.unwrap_or_else(|| config.server.listen_addr.clone());
    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| CheckerError::Config(format!("invalid listen addr {listen}: {e}")))?;
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CheckerError::Network(e.to_string()))?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
