use async_trait::async_trait;
use const_format::concatcp;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::data::{FundRecord, FundResponse};

// Paths
pub const API_VERSION_PATH: &str = "/api/v1";
pub const FUND_API_PATH: &str = concatcp!(API_VERSION_PATH, "/funds");

/// What went wrong while fetching a record. The container collapses all of
/// these into one user-facing failure message; the variants exist for logs
/// and tests.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed fund record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The data-fetching collaborator. The UI issues at most one request per
/// selection change and treats the transport as opaque.
#[async_trait]
pub trait FundClient: Send + Sync {
    async fn fund_record(&self, fund_id: &str) -> Result<FundRecord, FetchError>;
}

pub struct HttpFundClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFundClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn fund_url(&self, fund_id: &str) -> String {
        format!("{}{}/{}", self.base_url, FUND_API_PATH, fund_id)
    }
}

#[async_trait]
impl FundClient for HttpFundClient {
    async fn fund_record(&self, fund_id: &str) -> Result<FundRecord, FetchError> {
        let response = self.http.get(self.fund_url(fund_id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let envelope: FundResponse = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}
