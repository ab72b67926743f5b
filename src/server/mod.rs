// HTTP server module
// Exposes the orchestrator to front ends (dashboard, curl)

mod handlers;

pub use handlers::create_router;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::orchestrator::Orchestrator;

/// HTTP front door for the routing engine.
///
/// Stateless per query: the only state behind it is the orchestrator's
/// metrics log.
pub struct RouterServer {
    orchestrator: Arc<Orchestrator>,
    bind_address: String,
}

impl RouterServer {
    pub fn new(orchestrator: Orchestrator, bind_address: String) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            bind_address,
        }
    }

    /// Start serving until the process exits.
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.bind_address.parse()?;

        let app = create_router(Arc::new(self))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        tracing::info!("Starting GreenRoute server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }
}
