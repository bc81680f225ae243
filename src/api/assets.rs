//! Embedded chat page assets
//!
//! The `ui/` directory is compiled into the binary. In development, files
//! missing from the embed are read from the filesystem instead.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    response::IntoResponse,
};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Serve one static file, embedded or from the filesystem
pub async fn serve_static(req: Request<Body>) -> impl IntoResponse {
    let path = req.uri().path().trim_start_matches('/');

    match load(path) {
        Some(bytes) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(bytes))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not found"))
            .unwrap(),
    }
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    String::from_utf8(load("index.html")?).ok()
}

fn load(path: &str) -> Option<Vec<u8>> {
    // The filesystem fallback must not serve anything outside ui/
    if path.contains("..") {
        return None;
    }

    if let Some(content) = Assets::get(path) {
        return Some(content.data.to_vec());
    }

    std::fs::read(Path::new("ui").join(path)).ok()
}
