use clustory_core::metrics::CLUSTER_PATH;
use clustory_core::{
    ClusterInfo, ClustoryError, CpuInfo, DiskInfo, FetchError, MemoryInfo, MetricKind, Result,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client for the metrics REST API.
///
/// Every call is independent and returns a [`FetchError`] instead of
/// panicking or retrying; the caller decides what a failure means.
#[derive(Debug, Clone)]
pub struct MetricsClient {
    http:     reqwest::Client,
    /// Base address without a trailing slash.
    base_url: String,
}

impl MetricsClient {
    /// Build a client for `base_url`. `timeout` of `None` keeps the transport
    /// default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClustoryError::Http(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/metrics/cpu`
    pub async fn cpu(&self) -> Result<CpuInfo, FetchError> {
        self.get_json(MetricKind::Cpu.path()).await
    }

    /// `GET /api/metrics/memory`
    pub async fn memory(&self) -> Result<MemoryInfo, FetchError> {
        self.get_json(MetricKind::Memory.path()).await
    }

    /// `GET /api/metrics/disk`
    pub async fn disk(&self) -> Result<DiskInfo, FetchError> {
        self.get_json(MetricKind::Disk.path()).await
    }

    /// `GET /api/k8sinfo`
    pub async fn cluster(&self) -> Result<ClusterInfo, FetchError> {
        self.get_json(CLUSTER_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(%url, status = status.as_u16(), bytes = body.len(), "metrics response");
        decode(status, &body)
    }
}

/// Turn a raw response into a typed payload.
///
/// Non-2xx statuses and bodies missing required fields are both errors.
pub fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status {
            code:   status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))
}
