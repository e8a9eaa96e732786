//! HTTP server setup and routing.
//!
//! Two pages are served: the artist listing at `/` and one artist at
//! `/artist?id=<n>`. Everything else gets the not-found page.

use crate::aggregate::LookupService;
use crate::config::ServerConfig;
use crate::error::AggregateError;
use crate::render;
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<LookupService>,
}

/// Query string of the detail page.
#[derive(Debug, Deserialize)]
pub struct ArtistQuery {
    id: Option<String>,
}

/// Build the router with every route and the not-found fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/artist", get(artist))
        .fallback(fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C.
pub async fn run(config: &ServerConfig, lookup: Arc<LookupService>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState { lookup }))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// GET / - all artists
async fn index(State(state): State<AppState>) -> Response {
    debug!(cache = %state.lookup.state(), "Serving artist listing");
    match state.lookup.list_all().await {
        Ok(aggregate) => Html(render::render_index(&aggregate)).into_response(),
        Err(e) => unavailable(e),
    }
}

/// GET /artist?id=N - one artist
async fn artist(State(state): State<AppState>, Query(query): Query<ArtistQuery>) -> Response {
    let id = match parse_id(query.id.as_deref()) {
        Ok(id) => id,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(render::render_bad_request(message)),
            )
                .into_response()
        }
    };

    match state.lookup.find_by_id(id).await {
        Ok(Some(artist)) => Html(render::render_artist(&artist)).into_response(),
        Ok(None) => not_found(),
        Err(e) => unavailable(e),
    }
}

async fn fallback() -> Response {
    not_found()
}

/// Parse the `id` query parameter.
fn parse_id(raw: Option<&str>) -> std::result::Result<usize, &'static str> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err("Missing artist id");
    }
    raw.parse::<usize>()
        .map_err(|_| "Artist id must be a non-negative integer")
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(render::render_not_found())).into_response()
}

/// Log the failure in full; the page itself only says which side failed.
fn unavailable(e: Arc<AggregateError>) -> Response {
    let message = if e.is_fetch() {
        warn!("Remote API unavailable: {}", e);
        "The artist API could not be reached. Please try again later."
    } else {
        error!("Failed to assemble artist data: {}", e);
        "The artist data could not be assembled. Please try again later."
    };
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Html(render::render_error(message)),
    )
        .into_response()
}
