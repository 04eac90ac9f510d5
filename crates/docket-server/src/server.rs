use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Docket HTTP server: a set of mounted per-type document routers served
/// on one listener.
pub struct DocketServer {
    config: ServerConfig,
    router: Router,
}

impl DocketServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: Router::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Mount a per-type router under a path prefix, e.g.
    /// `mount("/api/people", document_routes(store))`.
    pub fn mount(mut self, prefix: &str, routes: Router) -> Self {
        self.router = self.router.nest(prefix, routes);
        self
    }

    /// The assembled router (useful for testing).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router.layer(TraceLayer::new_for_http());
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("docket server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
