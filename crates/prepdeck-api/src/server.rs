use crate::{create_router, AppState};
use prepdeck_core::{PrepdeckError, Result};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { state, addr }
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        info!("Starting PrepDeck API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(PrepdeckError::Io)?;

        info!("Server listening on http://{}", self.addr);
        info!("API documentation:");
        info!("  GET /health - Health check");
        info!("  GET /api/company?slug=<slug>&period=<period> - Questions for one period");
        info!("  GET /api/companies-list - Company directory");
        info!("  GET /api/company/:slug/:period - Bare question array");
        info!("  GET /api/company/:slug - All periods for a company");
        info!("  POST /api/analyze - Time complexity estimate");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| PrepdeckError::Io(e.into()))?;

        Ok(())
    }
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
