use clustory_agent::{router, HostSnapshot};
use clustory_core::{ClusterInfo, CpuInfo, DiskInfo, MemoryInfo};
use tokio::sync::watch;

fn snapshot(disk: Result<DiskInfo, String>) -> HostSnapshot {
    HostSnapshot {
        cpu:    CpuInfo { usage: 37.5 },
        memory: MemoryInfo {
            total:        1_073_741_824.0,
            used:         536_870_912.0,
            free:         536_870_912.0,
            used_percent: 50.0,
        },
        disk,
    }
}

fn root_disk() -> DiskInfo {
    DiskInfo {
        total:        2_147_483_648.0,
        used:         1_073_741_824.0,
        free:         1_073_741_824.0,
        used_percent: 50.0,
        path:         "/".into(),
    }
}

async fn serve(host: HostSnapshot) -> (String, watch::Sender<HostSnapshot>) {
    let (tx, rx) = watch::channel(host);
    let app = router(rx, clustory_core::cluster::topology());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), tx)
}

#[tokio::test]
async fn serves_latest_snapshot() {
    let (base, tx) = serve(snapshot(Ok(root_disk()))).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/api/metrics/memory"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["usedPercent"], 50.0);
    assert_eq!(body["total"], 1_073_741_824.0);

    let mut next = snapshot(Ok(root_disk()));
    next.cpu.usage = 81.0;
    tx.send(next).unwrap();

    let cpu: CpuInfo = reqwest::get(format!("{base}/api/metrics/cpu"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cpu.usage, 81.0);

    let disk: DiskInfo = reqwest::get(format!("{base}/api/metrics/disk"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(disk, root_disk());
}

#[tokio::test]
async fn missing_mount_is_a_server_error() {
    let (base, _tx) = serve(snapshot(Err("no filesystem mounted at /data".into()))).await;

    let response = reqwest::get(format!("{base}/api/metrics/disk")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "no filesystem mounted at /data");
}

#[tokio::test]
async fn cluster_listing_indexes_pods_by_node() {
    let (base, _tx) = serve(snapshot(Ok(root_disk()))).await;

    let info: ClusterInfo = reqwest::get(format!("{base}/api/k8sinfo"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info.nodes.len(), 4);
    assert_eq!(info.pods.len(), 5);
    assert_eq!(info.pods_on("node-2").len(), 2);
}

#[tokio::test]
async fn cors_headers_and_preflight() {
    let (base, _tx) = serve(snapshot(Ok(root_disk()))).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/metrics/cpu"))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{base}/api/metrics/cpu"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "GET")
        .header("access-control-request-headers", "x-csrf-token")
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status(), reqwest::StatusCode::OK);
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
    let methods = preflight.headers()["access-control-allow-methods"].to_str().unwrap().to_owned();
    assert!(methods.contains("GET") && methods.contains("DELETE"));
    let allowed = preflight.headers()["access-control-allow-headers"].to_str().unwrap().to_owned();
    assert!(allowed.contains("x-csrf-token"));
    assert!(preflight.text().await.unwrap().is_empty());
}
