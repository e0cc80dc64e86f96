use reqwest::Client as HttpClient;
use super::models::{ApiError, TransactionsResponse};
use tracing::{debug, warn};

/// Blockscout explorer client for the validated transactions listing
pub struct BlockscoutClient {
    http_client: HttpClient,
    url: String,
}

impl BlockscoutClient {
    pub const DEFAULT_URL: &'static str =
        "https://celo-alfajores.blockscout.com/api/v2/transactions?filter=validated";

    /// Create a client for the given transactions URL.
    ///
    /// No timeout is configured; a stalled explorer blocks until the transport gives up.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET /api/v2/transactions?filter=validated
    ///
    /// Issues exactly one request. The status code is logged but not checked,
    /// the body is always handed to the JSON decoder.
    ///
    /// # Returns
    /// * `Ok(TransactionsResponse)` - Records from the first page of results
    /// * `Err(ApiError)` - Network, decoding or payload shape failure
    pub async fn get_validated_transactions(&self) -> Result<TransactionsResponse, ApiError> {
        debug!("GET {}", self.url);

        let response = self.http_client
            .get(&self.url)
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        if status.is_success() {
            debug!("Explorer responded with {}", status);
        } else {
            warn!("Explorer responded with {}, decoding body anyway", status);
        }

        let body = response.text().await.map_err(ApiError::Body)?;
        debug!("Received {} bytes", body.len());

        TransactionsResponse::from_body(&body)
    }
}
