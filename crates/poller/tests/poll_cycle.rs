use axum::{http::StatusCode, routing::get, Json, Router};
use clustory_client::MetricsClient;
use clustory_core::format::Summary;
use clustory_core::state::Phase;
use clustory_core::MetricKind;
use clustory_poller::{CancellationToken, Poller, Session};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn healthy_memory_and_disk() -> Router {
    Router::new()
        .route(
            "/api/metrics/memory",
            get(|| async {
                Json(json!({
                    "total": 1073741824u64,
                    "used": 536870912u64,
                    "free": 536870912u64,
                    "usedPercent": 50
                }))
            }),
        )
        .route(
            "/api/metrics/disk",
            get(|| async {
                Json(json!({
                    "total": 2147483648u64,
                    "used": 1073741824u64,
                    "free": 1073741824u64,
                    "usedPercent": 50,
                    "path": "/"
                }))
            }),
        )
}

fn poller(base: &str, period: Duration) -> Poller {
    Poller::new(MetricsClient::new(base, None).unwrap(), period)
}

#[tokio::test]
async fn cpu_failure_does_not_hide_other_metrics() {
    let router = healthy_memory_and_disk().route(
        "/api/metrics/cpu",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(router).await;

    let cycle = poller(&base, Duration::from_secs(5)).poll(1).await;
    assert_eq!(cycle.failures(), 1);
    assert!(cycle.cluster.is_none());

    let mut session = Session::new(1000);
    assert!(session.apply(cycle));
    let state = session.state();

    match state.cpu.status().phase() {
        Phase::Failed { message, stale } => {
            assert!(message.contains("500"));
            assert!(stale.is_none());
        }
        other => panic!("cpu should be failed, got {other:?}"),
    }
    assert!(state.history(MetricKind::Cpu).is_empty());

    let memory = state.memory.status().current().unwrap().summary();
    assert_eq!(memory.headline, "50.00%");
    assert_eq!(memory.detail.as_deref(), Some("0.50GB / 1.00GB"));
    assert_eq!(state.history(MetricKind::Disk).latest(), Some(50.0));
}

#[tokio::test]
async fn cluster_listing_polled_when_enabled() {
    let router = healthy_memory_and_disk()
        .route("/api/metrics/cpu", get(|| async { Json(json!({ "usage": 3.5 })) }))
        .route(
            "/api/k8sinfo",
            get(|| async {
                Json(json!({
                    "nodes": ["node-1"],
                    "pods": [{ "name": "default/web", "node": "node-1" }],
                    "nodesPods": { "node-1": ["default/web"] }
                }))
            }),
        );
    let base = serve(router).await;

    let cycle = poller(&base, Duration::from_secs(5)).with_cluster(true).poll(1).await;
    assert_eq!(cycle.failures(), 0);
    let cluster = cycle.cluster.unwrap().unwrap();
    assert_eq!(cluster.pods_on("node-1"), ["default/web"]);
}

#[tokio::test]
async fn first_poll_fires_immediately() {
    let router = healthy_memory_and_disk()
        .route("/api/metrics/cpu", get(|| async { Json(json!({ "usage": 10 })) }));
    let base = serve(router).await;

    let (mut session, mut rx) = Session::start(poller(&base, Duration::from_secs(3600)), 1000);

    let cycle = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("first cycle should not wait a full period")
        .expect("poller closed early");
    assert_eq!(cycle.seq, 1);
    session.apply(cycle);
    assert_eq!(session.state().history(MetricKind::Cpu).latest(), Some(10.0));
}

#[tokio::test]
async fn samples_accumulate_across_cycles() {
    let router = healthy_memory_and_disk()
        .route("/api/metrics/cpu", get(|| async { Json(json!({ "usage": 25 })) }));
    let base = serve(router).await;

    let (mut session, mut rx) = Session::start(poller(&base, Duration::from_millis(20)), 1000);
    for expected in 1..=3 {
        let cycle = timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();
        assert_eq!(cycle.seq, expected);
        session.apply(cycle);
    }
    assert_eq!(session.state().history(MetricKind::Cpu).len(), 3);
    assert_eq!(session.state().history(MetricKind::Memory).len(), 3);
}

#[tokio::test]
async fn cancellation_abandons_in_flight_cycle() {
    let router = healthy_memory_and_disk().route(
        "/api/metrics/cpu",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({ "usage": 1 }))
        }),
    );
    let base = serve(router).await;

    let cancel = CancellationToken::new();
    let mut rx = poller(&base, Duration::from_millis(10)).spawn(cancel.clone());

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let closed = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("poller should stop promptly after cancellation");
    assert!(closed.is_none(), "no cycle may be delivered after teardown");
}

#[tokio::test]
async fn teardown_stops_the_schedule() {
    let router = healthy_memory_and_disk()
        .route("/api/metrics/cpu", get(|| async { Json(json!({ "usage": 5 })) }));
    let base = serve(router).await;

    let (session, mut rx) = Session::start(poller(&base, Duration::from_millis(10)), 1000);
    timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();
    session.teardown();

    // Anything already buffered may still drain; after that the channel closes.
    let drained = timeout(Duration::from_secs(5), async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());
}
