use axum::{http::StatusCode, routing::get, Json, Router};
use clustory_app::{watch, WatchOptions};
use clustory_config::ClustoryConfig;
use clustory_history::RangeSelection;
use serde_json::json;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(base_url: String) -> ClustoryConfig {
    let mut config = ClustoryConfig::default();
    config.api.base_url = base_url;
    config.api.cluster = false;
    config.polling.interval_ms = 20;
    config
}

#[tokio::test]
async fn stops_after_cycle_limit_and_exports() {
    let router = Router::new()
        .route("/api/metrics/cpu", get(|| async { Json(json!({ "usage": 42.5 })) }))
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
        .route("/api/metrics/disk", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let base = serve(router).await;
    let dir = tempfile::tempdir().unwrap();

    let options = WatchOptions {
        cycles: Some(3),
        range:  RangeSelection::All,
        export: Some(dir.path().to_path_buf()),
    };
    let mut out = Vec::new();
    let report = watch(&config(base), options, &mut out).await.unwrap();

    assert_eq!(report.cycles, 3);
    assert_eq!(
        report.exported,
        vec![dir.path().join("cpu-all.csv"), dir.path().join("memory-all.csv")]
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("cpu-all.csv")).unwrap(),
        "label,value\nPt 1,42.5\nPt 2,42.5\nPt 3,42.5"
    );
    assert!(!dir.path().join("disk-all.csv").exists());

    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.lines().filter(|l| l.contains(" cpu ")).count(), 3);
    assert!(out.contains("memory 50.00% (0.50GB / 1.00GB)"));
    assert!(out.contains("error: server returned 503 Service Unavailable"));
    assert!(out.contains("no disk samples to export"));
}

#[tokio::test]
async fn unreachable_api_still_completes_cycles() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let options = WatchOptions { cycles: Some(2), range: RangeSelection::LastFiveMinutes, export: None };
    let mut out = Vec::new();
    let report = watch(&config(base), options, &mut out).await.unwrap();

    assert_eq!(report.cycles, 2);
    assert!(report.exported.is_empty());
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.lines().filter(|l| l.contains("error: request failed")).count(), 6);
}

#[tokio::test]
async fn zero_cycle_limit_polls_nothing() {
    let router = Router::new().route(
        "/api/metrics/cpu",
        get(|| async { Json(json!({ "usage": 1.0 })) }),
    );
    let base = serve(router).await;
    let dir = tempfile::tempdir().unwrap();

    let options = WatchOptions {
        cycles: Some(0),
        range:  RangeSelection::All,
        export: Some(dir.path().to_path_buf()),
    };
    let mut out = Vec::new();
    let report = watch(&config(base), options, &mut out).await.unwrap();

    assert_eq!(report.cycles, 0);
    assert!(report.exported.is_empty());
    assert!(out.is_empty());
    assert!(!dir.path().join("cpu-all.csv").exists());
}
