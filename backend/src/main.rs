#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use portfolio_server::{config::ServerConfig, router};
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // a missing .env is fine, every variable has a default
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("loading .env");
        }
    }

    let config = ServerConfig::from_env()?;
    if !config.frontend_dir.join("pkg").is_dir() {
        warn!(
            "No wasm bundle under {}, the page will load without its particle background",
            config.frontend_dir.display()
        );
    }

    let app = router(&config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Serving {} on {}", config.frontend_dir.display(), addr);
    axum::serve(listener, app).await?;
    Ok(())
}
