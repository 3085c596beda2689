//! Blocking HTTP implementation of [`DashboardApi`].

use reqwest::blocking::{Client, Response};

use crate::config::DashboardConfig;
use crate::domain::{BacktestRequest, BacktestResult, TextRequest, TextResponse};
use crate::error::ApiError;
use crate::fetch::{DashboardApi, Source};
use crate::ingest;

const BACKTEST_PATH: &str = "/api/momentum-backtest";
const PROCESS_PATH: &str = "/api/process";

/// Dashboard API over HTTP. One instance is owned by the worker thread.
pub struct HttpClient {
    client: Client,
    root: String,
}

impl HttpClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("momentum-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            root: config.api_root().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.root)
    }

    fn get_body(&self, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self.client.get(&url).send().map_err(transport)?;
        read_body(resp)
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Non-2xx becomes a status error; otherwise the body as text.
fn read_body(resp: Response) -> Result<String, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        tracing::debug!(%status, url = %resp.url(), "non-success status");
        return Err(ApiError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }
    resp.text().map_err(|e| ApiError::Decode(e.to_string()))
}

impl DashboardApi for HttpClient {
    fn health(&self) -> Result<(), ApiError> {
        self.get_body(Source::Health.path()).map(|_| ())
    }

    fn snapshot_body(&self, source: Source) -> Result<String, ApiError> {
        self.get_body(source.path())
    }

    fn backtest(&self, request: &BacktestRequest) -> Result<BacktestResult, ApiError> {
        let url = self.url(BACKTEST_PATH);
        let query = request.query_pairs();
        tracing::debug!(%url, ?query, "GET backtest");
        let resp = self.client.get(&url).query(&query).send().map_err(transport)?;
        let body = read_body(resp)?;
        Ok(ingest::parse_backtest(&body)?)
    }

    fn process_text(&self, request: &TextRequest) -> Result<TextResponse, ApiError> {
        let url = self.url(PROCESS_PATH);
        tracing::debug!(%url, operation = %request.operation, "POST process");
        let resp = self.client.post(&url).json(request).send().map_err(transport)?;
        let body = read_body(resp)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_root_and_path() {
        let mut config = DashboardConfig::default();
        config.set_base_url("http://localhost:8000/").unwrap();
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(
            client.url(Source::Primary.path()),
            "http://localhost:8000/api/momentum-analysis"
        );
        assert_eq!(client.url(BACKTEST_PATH), "http://localhost:8000/api/momentum-backtest");
    }

    #[test]
    fn unreachable_server_is_transport_error() {
        let mut config = DashboardConfig::default();
        // Port 9 (discard) on loopback is closed on CI runners.
        config.set_base_url("http://127.0.0.1:9").unwrap();
        config.request_timeout_secs = Some(2);
        let client = HttpClient::new(&config).unwrap();
        let err = client.health().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    }
}
