//! HTTP client for the cost-reporting API.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::allocation::{AllocationData, AllocationQuery, AllocationResponse};
use crate::auth::Token;
use crate::cloud_cost::{self, CloudCostSum, CLOUD_COST_AGGREGATE};
use crate::config::CostApiConfig;
use crate::error::{CostApiError, Result};
use crate::window::Window;

/// Operations exposed by a cost-reporting backend.
///
/// Each call is a single request/response round trip with no retries.
#[async_trait]
pub trait CostApi: Send + Sync {
    /// Fetch a bearer token from the auth endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CostApiError::TokenExpired`] when the endpoint reports an
    /// anonymous session, or an HTTP error if the request fails.
    async fn get_token(&self) -> Result<Token>;

    /// Sum amortized net cloud cost over `window`.
    ///
    /// Failures are reported through [`CloudCostSum::availability`] rather
    /// than an error, since a missing cloud billing integration is common.
    async fn get_cloud_cost_sum(&self, window: &Window, headers: &HeaderMap) -> CloudCostSum;

    /// Fetch allocations grouped by the report's label dimensions.
    ///
    /// Returns the response's `data` field exactly as sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not JSON with a `data` field.
    async fn get_aggregated_allocations(
        &self,
        window: &Window,
        headers: &HeaderMap,
    ) -> Result<AllocationData>;
}

/// reqwest-backed [`CostApi`] implementation.
#[derive(Debug, Clone)]
pub struct CostApiClient {
    client: Client,
    config: CostApiConfig,
}

impl CostApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: CostApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(CostApiError::Http)?;

        Ok(Self { client, config })
    }

    /// Create a client from `COST_API_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(CostApiConfig::from_env()?)
    }

    /// Use an already configured reqwest client.
    #[must_use]
    pub fn with_http_client(client: Client, config: CostApiConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &CostApiConfig {
        &self.config
    }

    /// Turn a non-success response into [`CostApiError::Api`].
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(CostApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_cloud_costs(&self, window: &Window, headers: &HeaderMap) -> Result<String> {
        let url = self.config.endpoint("/cloudCost");
        debug!(url = %url, window = %window, "Requesting cloud costs");

        let response = self
            .client
            .get(&url)
            .headers(headers.clone())
            .query(&[
                ("window", window.as_str()),
                ("aggregate", CLOUD_COST_AGGREGATE),
            ])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl CostApi for CostApiClient {
    #[instrument(skip(self))]
    async fn get_token(&self) -> Result<Token> {
        let url = self.config.auth_url();
        debug!(url = %url, "Requesting auth token");

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        let body = response.bytes().await?;

        Token::from_bytes(&body)
    }

    #[instrument(skip(self, headers))]
    async fn get_cloud_cost_sum(&self, window: &Window, headers: &HeaderMap) -> CloudCostSum {
        let summed = match self.fetch_cloud_costs(window, headers).await {
            Ok(body) => cloud_cost::sum_from_body(&body),
            Err(e) => Err((0.0, e)),
        };

        match summed {
            Ok(total) => {
                info!(total, "cloud cost available");
                CloudCostSum::available(total)
            }
            Err((total, cause)) => {
                warn!("could not acquire cloud cost - not configured or no data to retrieve");
                debug!(error = %cause, "cloud cost request failed");
                CloudCostSum::unavailable(total, cause)
            }
        }
    }

    #[instrument(skip(self, headers))]
    async fn get_aggregated_allocations(
        &self,
        window: &Window,
        headers: &HeaderMap,
    ) -> Result<AllocationData> {
        let url = self.config.endpoint("/allocation");
        let query = AllocationQuery::new(window.clone());
        debug!(url = %url, window = %window, "Requesting aggregated allocations");

        let response = self
            .client
            .get(&url)
            .headers(headers.clone())
            .query(&query.query_pairs())
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        let parsed: AllocationResponse = serde_json::from_str(&body)?;

        parsed.data.ok_or_else(|| {
            CostApiError::MalformedResponse("allocation response has no data field".to_string())
        })
    }
}
