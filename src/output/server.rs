//! HTTP metrics endpoint
//!
//! `GET /metrics` renders a snapshot: in pull mode a fresh cycle runs per
//! request, in timer mode the latest published snapshot is served.
//! `POST /reboot` reboots the router.

use crate::collector::{Collector, SnapshotStore};
use crate::config::{CollectionMode, ExporterConfig};
use crate::output::prometheus;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Shared state of the HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    collector: Arc<Collector>,
    mode: CollectionMode,
    interval: Duration,
    store: SnapshotStore,
}

impl AppState {
    pub fn new(collector: Arc<Collector>, config: &ExporterConfig) -> Self {
        Self {
            collector,
            mode: config.collection_mode,
            interval: config.interval(),
            store: SnapshotStore::new(),
        }
    }
}

/// Builds the router for the metrics endpoint
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/metrics", get(metrics_handler))
        .route("/reboot", post(reboot_handler))
        .with_state(state)
}

/// Serves the endpoint on `listener`
///
/// In timer mode the collection loop is spawned first so the first snapshot
/// is being gathered while the server starts.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if state.mode == CollectionMode::Timer {
        let collector = Arc::clone(&state.collector);
        let store = state.store.clone();
        let interval = state.interval;
        tokio::spawn(async move { collector.run_periodic(interval, store).await });
    }

    tracing::info!(
        "Serving metrics on http://{}/metrics ({:?} mode)",
        listener.local_addr()?,
        state.mode
    );
    axum::serve(listener, build_app(state)).await
}

async fn index_handler() -> &'static str {
    "tplink-exporter\n\nMetrics are served on /metrics\n"
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let snapshot = match state.mode {
        CollectionMode::Pull => match state.collector.scrape().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::error!("Error scraping data for router: {}", e);
                return (StatusCode::SERVICE_UNAVAILABLE, format!("{}\n", e)).into_response();
            }
        },
        CollectionMode::Timer => match state.store.latest().await {
            Some(snapshot) => snapshot,
            None => {
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "no successful scrape yet\n",
                )
                    .into_response();
            }
        },
    };

    (
        [(header::CONTENT_TYPE, prometheus::CONTENT_TYPE)],
        prometheus::render(&snapshot),
    )
        .into_response()
}

async fn reboot_handler(State(state): State<AppState>) -> Response {
    match state.collector.reboot().await {
        Ok(()) => (StatusCode::ACCEPTED, "reboot requested\n").into_response(),
        Err(e) => {
            tracing::error!("Reboot failed: {}", e);
            (StatusCode::BAD_GATEWAY, format!("{}\n", e)).into_response()
        }
    }
}
