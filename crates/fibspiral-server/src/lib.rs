//! HTTP boundary for the spiral renderer.
//!
//! Routes:
//! - `GET /api/fibonacci-image?terms=&size=` renders a PNG
//! - `POST /api/calculate` with a form body `a`, `b`, `op`
//! - `GET /` (and any unmatched path) serves the landing page
//!
//! Every response carries permissive CORS headers, and `OPTIONS` on any path
//! answers `204` before routing.

pub mod calc;
pub mod config;
pub mod error;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{RawQuery, Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
};
use fibspiral::{DEFAULT_SIZE, DEFAULT_TERMS, SpiralParams, render_spiral_png};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    index_path: Arc<PathBuf>,
}

/// Build the router for `config`.
pub fn app(config: &ServerConfig) -> Router {
    let state = AppState {
        index_path: Arc::new(config.index_path.clone()),
    };
    Router::new()
        .route("/api/fibonacci-image", any(fibonacci_image))
        .route("/api/calculate", any(calculate))
        .route("/", any(index))
        .fallback(index)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answer preflights and stamp CORS headers on everything else.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    response
}

/// Decode `k=v&...`; a malformed string decodes as empty. Later keys win.
fn decode_pairs(raw: &[u8]) -> HashMap<String, String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(raw)
        .unwrap_or_default()
        .into_iter()
        .collect()
}

/// Integer parameter; missing or unparsable falls back to `default`.
fn int_param(params: &HashMap<String, String>, key: &str, default: u32) -> i64 {
    match params.get(key) {
        None => default as i64,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparsable parameter, using default");
            default as i64
        }),
    }
}

async fn fibonacci_image(method: Method, RawQuery(query): RawQuery) -> Response {
    if method != Method::GET {
        return (StatusCode::METHOD_NOT_ALLOWED, "GET only").into_response();
    }
    let params = decode_pairs(query.unwrap_or_default().as_bytes());
    match render_image(&params).await {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn render_image(params: &HashMap<String, String>) -> Result<Vec<u8>, ApiError> {
    let terms = int_param(params, "terms", DEFAULT_TERMS);
    let size = int_param(params, "size", DEFAULT_SIZE);
    let spiral = SpiralParams::new(terms, size)?;

    tracing::info!(terms = spiral.terms, size = spiral.size, "rendering spiral");
    let png = tokio::task::spawn_blocking(move || render_spiral_png(&spiral)).await??;
    Ok(png)
}

async fn calculate(method: Method, body: Bytes) -> Response {
    if method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, "POST only").into_response();
    }
    let response = calc::evaluate(&decode_pairs(&body));
    match serde_json::to_vec(&response) {
        Ok(json) => (
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            json,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "could not serialize result");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn index(method: Method, State(state): State<AppState>) -> Response {
    if method != Method::GET {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    }
    match tokio::fs::read(state.index_path.as_path()).await {
        Ok(html) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "index.html not found").into_response()
        }
        Err(err) => ApiError::Io(err).into_response(),
    }
}
