//! Local preview server

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::helpers::normalize_path;
use crate::og::{og_file_name, og_titles, OgImageRenderer, SvgCardRenderer};
use crate::redirects::RedirectMap;
use crate::Site;

/// Server state, built once before the router starts
struct ServerState {
    public_dir: PathBuf,
    redirects: RedirectMap,
    renderer: Box<dyn OgImageRenderer>,
    /// Card file name -> title
    cards: HashMap<String, String>,
}

/// Start the preview server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let redirects = site.redirects()?;
    let entries = site.load_all()?;
    let renderer: Box<dyn OgImageRenderer> = Box::new(SvgCardRenderer::new(&site.config));
    let cards = card_index(&og_titles(&entries), renderer.extension());

    tracing::info!(
        "Serving {} redirects and {} preview cards",
        redirects.len(),
        cards.len()
    );

    let state = Arc::new(ServerState {
        public_dir: site.public_dir.clone(),
        redirects,
        renderer,
        cards,
    });

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/get-time", get(time_handler))
        .route("/og/:file", get(og_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn card_index(titles: &[&str], extension: &str) -> HashMap<String, String> {
    titles
        .iter()
        .map(|title| (og_file_name(title, extension), title.to_string()))
        .collect()
}

/// Current UTC time in RFC 3339
async fn time_handler() -> String {
    chrono::Utc::now().to_rfc3339()
}

async fn og_handler(
    State(state): State<Arc<ServerState>>,
    Path(file): Path<String>,
) -> Response {
    let Some(title) = state.cards.get(&file) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    match state.renderer.render(title) {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, state.renderer.content_type())],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to render preview for {:?}: {:#}", title, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
        }
    }
}

/// Apply the redirect table, otherwise serve the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    if let Some(target) = redirect_target(&state.redirects, request.uri().path()) {
        tracing::debug!("Redirecting {} -> {}", request.uri().path(), target);
        return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response();
    }

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

fn redirect_target(redirects: &RedirectMap, path: &str) -> Option<String> {
    let path = percent_decode_str(path).decode_utf8_lossy();
    redirects
        .get(&normalize_path(&path))
        .map(|target| normalize_path(target))
}
