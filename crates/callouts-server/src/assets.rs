//! Static file serving using rust-embed

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embed the client directory at compile time
#[derive(RustEmbed)]
#[folder = "../../client"]
struct ClientAssets;

fn asset_response(path: &str) -> Option<Response> {
    ClientAssets::get(path).map(|content| {
        let mime_type = mime_guess::from_path(path).first_or_text_plain();
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime_type.to_string())],
            content.data.into_owned(),
        )
            .into_response()
    })
}

/// Serve static files from the embedded client directory
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Default to index.html for root path
    let path = if path.is_empty() { "index.html" } else { path };

    asset_response(path)
        .or_else(|| asset_response("index.html"))
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "Not Found").into_response())
}
