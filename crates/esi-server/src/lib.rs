//! # esi-server
//!
//! HTTP surface of the ESI contact backend, built on axum:
//! - `POST /api/contact`: validate, persist, relay (via `ContactService`)
//! - `GET /api/health`: liveness plus the configured port
//! - everything else: static files from the site root, minus dotfiles and
//!   the inbox
//!
//! [`run`] binds the configured address and serves until Ctrl-C. [`serve`]
//! takes an already bound listener, which is what the tests use.

pub mod error;
mod private_files;
mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use esi_config::EsiConfig;
use esi_service::ContactService;
use tokio::net::TcpListener;

use crate::private_files::PrivateFiles;

pub use error::{ApiError, ServerError};
pub use routes::router;

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns `ServerError` if the address is invalid, cannot be bound, or the
/// listener fails while serving.
pub async fn run(config: &EsiConfig, service: ContactService) -> Result<(), ServerError> {
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr().unwrap_or(addr);

    tracing::info!("server running: http://localhost:{}", local.port());
    tracing::info!("site:           http://localhost:{}/contact.html", local.port());
    tracing::info!("inbox file:     {}", service.inbox().path().display());

    let inbox = service.inbox().path();
    if PrivateFiles::new(&config.server.site_root, [inbox]).is_under_site_root(inbox) {
        tracing::warn!(
            inbox = %inbox.display(),
            site_root = %config.server.site_root.display(),
            "inbox file is inside the site root; it is hidden from static serving"
        );
    }

    let app = router(Arc::new(service), &config.server);
    serve(listener, app, shutdown_signal()).await
}

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after `shutdown` fires.
///
/// # Errors
///
/// Returns `ServerError::Serve` if accepting connections fails.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for Ctrl-C; stop the process to shut down");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested, draining in-flight requests");
}
