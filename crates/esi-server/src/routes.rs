//! Route table and handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, DefaultBodyLimit, State};
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use esi_config::ServerConfig;
use esi_core::responses::{ContactAccepted, HealthResponse};
use esi_core::{ContactInput, RequestContext};
use esi_service::ContactService;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::private_files::{PrivateFiles, hide_private_files};

const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Clone)]
struct AppState {
    service: Arc<ContactService>,
    port: u16,
}

/// Build the application router.
///
/// `/api/contact` and `/api/health` are handled here; every other path is
/// served from `config.site_root`, except dotfiles and the inbox file, which
/// answer `404`.
pub fn router(service: Arc<ContactService>, config: &ServerConfig) -> Router {
    let private = Arc::new(PrivateFiles::new(
        &config.site_root,
        [service.inbox().path()],
    ));
    let state = AppState {
        service,
        port: config.port,
    };

    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/health", get(health))
        .with_state(state)
        .fallback_service(ServeDir::new(&config.site_root))
        .layer(middleware::from_fn_with_state(private, hide_private_files))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn submit_contact(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<ContactAccepted>, ApiError> {
    let Json(input) = body?;
    let context = request_context(&headers, peer);
    let outcome = state.service.submit(input, context).await?;
    Ok(Json(outcome.into()))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        port: state.port,
    })
}

/// User agent and source address for a request.
///
/// A present `X-Forwarded-For` header is recorded as-is; otherwise the peer
/// address of the connection is used.
fn request_context(headers: &HeaderMap, peer: SocketAddr) -> RequestContext {
    let user_agent = header_text(headers, USER_AGENT.as_str()).unwrap_or_default();
    let source_address = header_text(headers, FORWARDED_FOR)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| peer.ip().to_string());
    RequestContext::new(user_agent, source_address)
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
}
