//! Metrics agent: serves host CPU, memory and disk readings plus the node/pod
//! listing over HTTP.

pub mod collector;

pub use collector::{spawn_collector, HostSnapshot};

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clustory_core::metrics::CLUSTER_PATH;
use clustory_core::{ClusterInfo, CpuInfo, MemoryInfo, MetricKind};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
struct AgentState {
    snapshot: watch::Receiver<HostSnapshot>,
    topology: Arc<ClusterInfo>,
}

/// Build the API router over a live snapshot channel.
pub fn router(snapshot: watch::Receiver<HostSnapshot>, topology: ClusterInfo) -> Router {
    let state = AgentState { snapshot, topology: Arc::new(topology) };

    Router::new()
        .route(MetricKind::Cpu.path(), get(cpu))
        .route(MetricKind::Memory.path(), get(memory))
        .route(MetricKind::Disk.path(), get(disk))
        .route(CLUSTER_PATH, get(cluster))
        .layer(cors())
        .with_state(state)
}

async fn cpu(State(state): State<AgentState>) -> Json<CpuInfo> {
    Json(state.snapshot.borrow().cpu.clone())
}

async fn memory(State(state): State<AgentState>) -> Json<MemoryInfo> {
    Json(state.snapshot.borrow().memory.clone())
}

async fn disk(State(state): State<AgentState>) -> Response {
    let disk = state.snapshot.borrow().disk.clone();
    match disk {
        Ok(info) => Json(info).into_response(),
        Err(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response(),
    }
}

async fn cluster(State(state): State<AgentState>) -> Json<ClusterInfo> {
    Json(state.topology.as_ref().clone())
}

/// Allow any origin. Pre-flight `OPTIONS` requests are answered by the layer
/// without reaching a handler.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
        ])
}
