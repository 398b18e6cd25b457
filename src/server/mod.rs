//! HTTP webhook server
//!
//! The voice platform posts request envelopes to `/` (or `/skill`) and gets
//! the response envelope back. `/health` reports liveness and the store.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::request::RequestEnvelope;
use crate::models::response::ResponseEnvelope;
use crate::services::SkillService;
use crate::utils::errors::Result;

/// Build the full axum router with all routes and middleware
pub fn build_router(service: Arc<SkillService>) -> Router {
    Router::new()
        .route("/", post(handle_skill_request))
        .route("/skill", post(handle_skill_request))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn handle_skill_request(
    State(service): State<Arc<SkillService>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Json<ResponseEnvelope> {
    Json(service.handle(&envelope).await)
}

async fn health(State(service): State<Arc<SkillService>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": crate::NAME,
        "version": crate::VERSION,
        "store": service.store().name(),
    }))
}

/// Serve until Ctrl-C or SIGTERM
pub async fn serve(listener: TcpListener, service: Arc<SkillService>) -> Result<()> {
    let app = build_router(service);
    info!(address = ?listener.local_addr().ok(), "Skill webhook listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Skill webhook stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
