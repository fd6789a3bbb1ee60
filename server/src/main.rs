use anyhow::Result;
use filemgr_server::{config, AppState, HttpServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config::DEFAULT_LOG_FILTER))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config::ServerConfig::default();
    let server = HttpServer::bind(&config, AppState::new()).await?;
    server.run().await
}
