#![forbid(unsafe_code)]
pub mod config;

use axum::{extract::Request, middleware::Next, response::Response, Router};
use config::ServerConfig;
use tower_http::services::ServeDir;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, timeout::TimeoutLayer,
};
use tracing::trace;

async fn trace_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    trace!("{} {} -> {}", method, path, response.status());
    response
}

/// The portfolio page: every path is looked up in the frontend directory, which
/// also carries the particle background's wasm bundle under `pkg/`.
pub fn router(config: &ServerConfig) -> Router {
    let frontend = ServeDir::new(&config.frontend_dir);

    let middleware = tower::ServiceBuilder::new()
        .layer(CompressionLayer::new().quality(tower_http::CompressionLevel::Fastest))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CatchPanicLayer::new())
        .layer(axum::middleware::from_fn(trace_request));

    Router::new().fallback_service(frontend).layer(middleware)
}
