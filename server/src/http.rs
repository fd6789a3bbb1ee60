use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use crate::{config::ServerConfig, routes, AppState};

/// Builds the router with all endpoints. Request bodies are not size-limited.
/// Handlers that need the caller's address expect `ConnectInfo<SocketAddr>` to
/// be provided by the server.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/register", post(routes::register))
        .route("/clients", get(routes::list_clients))
        .route("/file_list/:client_name", get(routes::file_list))
        .route("/read_file/:client_name", get(routes::read_file))
        .route("/delete_file/:client_name", post(routes::delete_file))
        .route("/create_file/:client_name", post(routes::create_file))
        .route("/create_directory/:client_name", post(routes::create_directory))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct HttpServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl HttpServer {
    pub async fn bind(config: &ServerConfig, state: AppState) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        Ok(HttpServer {
            listener,
            state: Arc::new(state),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        info!("File manager server listening on {}", self.listener.local_addr()?);
        let app = app(self.state);
        axum::serve(
            self.listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;
        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
