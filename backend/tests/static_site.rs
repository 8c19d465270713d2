use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use portfolio_server::{config::ServerConfig, router};
use std::{fs, path::PathBuf};
use tower::ServiceExt;

/// A throwaway site directory, deleted when dropped.
struct SiteDir(PathBuf);

impl SiteDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "portfolio-server-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(dir.join("pkg")).expect("create site dir");
        fs::write(
            dir.join("index.html"),
            "<section class=\"hero\"></section>",
        )
        .expect("write index.html");
        fs::write(dir.join("pkg/particle_field_bg.wasm"), b"\0asm\x01\0\0\0")
            .expect("write wasm");
        Self(dir)
    }

    fn config(&self) -> ServerConfig {
        ServerConfig {
            frontend_dir: self.0.clone(),
            ..ServerConfig::default()
        }
    }
}

impl Drop for SiteDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn site_dir_is_removed_on_drop() {
    let site = SiteDir::new("drop");
    let path = site.0.clone();
    assert!(path.join("index.html").is_file());
    drop(site);
    assert!(!path.exists());
}

#[tokio::test]
async fn serves_index_at_root() {
    let site = SiteDir::new("index");
    let app = router(&site.config());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("class=\"hero\""));
}

#[tokio::test]
async fn serves_wasm_with_wasm_mime_type() {
    let site = SiteDir::new("wasm");
    let app = router(&site.config());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/pkg/particle_field_bg.wasm")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/wasm"
    );
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let site = SiteDir::new("missing");
    let app = router(&site.config());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/no-such-page.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
