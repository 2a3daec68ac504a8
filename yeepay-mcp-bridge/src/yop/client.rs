//! Gateway client: the `post`/`get` capability consumed by the payment
//! operations.
//!
//! The trait seam exists so operations can be exercised against canned
//! envelopes in tests; [`YopHttpClient`] is the production implementation.
//! Request signing and response signature verification belong to the
//! gateway SDK layer and are not performed here: this client transports
//! payloads and parses envelopes only.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::{
    config::YeepayConfig,
    error::{Result, YeepayError},
    yop::envelope::ResponseEnvelope,
};

/// Abstraction over the gateway's request capabilities.
///
/// `post` submits a JSON body (pre-payment), `get` submits query parameters
/// (order query). Both return the common response envelope.
#[async_trait]
pub trait YopGateway: Send + Sync {
    /// Submits a JSON body to a gateway path.
    async fn post(&self, path: &str, body: &Value) -> Result<ResponseEnvelope>;

    /// Reads from a gateway path with query parameters.
    ///
    /// `params` must be a JSON object; its entries become the query string.
    async fn get(&self, path: &str, params: &Value) -> Result<ResponseEnvelope>;
}

/// HTTP-backed gateway client.
pub struct YopHttpClient {
    http: Client,
    base_url: Url,
    app_key: String,
}

impl YopHttpClient {
    /// Creates a client from merchant configuration.
    ///
    /// The underlying HTTP client uses a 30-second total timeout, a
    /// 10-second connect timeout, and a bounded idle connection pool.
    ///
    /// # Errors
    ///
    /// Returns error if the configured base URL does not parse or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &YeepayConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            YeepayError::Configuration(format!(
                "invalid YOP_API_BASE_URL '{}': {e}",
                config.api_base_url
            ))
        })?;

        let http = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(YeepayError::Http)?;

        Ok(Self { http, base_url, app_key: config.app_key.clone() })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            YeepayError::Unexpected(format!("invalid gateway path '{path}': {e}"))
        })
    }

    async fn read_envelope(&self, request: reqwest::RequestBuilder) -> Result<ResponseEnvelope> {
        let request_id = Uuid::new_v4().to_string();
        debug!(%request_id, "sending gateway request");

        let response = request
            .header("x-yop-appkey", &self.app_key)
            .header("x-yop-request-id", &request_id)
            .send()
            .await?
            .error_for_status()?;

        let envelope = response.json::<ResponseEnvelope>().await?;
        debug!(%request_id, state = %envelope.state, "gateway response received");
        Ok(envelope)
    }
}

#[async_trait]
impl YopGateway for YopHttpClient {
    #[instrument(skip(self, body))]
    async fn post(&self, path: &str, body: &Value) -> Result<ResponseEnvelope> {
        let url = self.endpoint(path)?;
        self.read_envelope(self.http.post(url).json(body)).await
    }

    #[instrument(skip(self, params))]
    async fn get(&self, path: &str, params: &Value) -> Result<ResponseEnvelope> {
        let mut url = self.endpoint(path)?;

        if let Some(map) = params.as_object() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in map {
                match value {
                    Value::String(s) => {
                        query_pairs.append_pair(key, s);
                    }
                    other => {
                        query_pairs.append_pair(key, &other.to_string());
                    }
                }
            }
        }

        self.read_envelope(self.http.get(url)).await
    }
}

// The app key is a credential; keep it out of Debug output.
impl std::fmt::Debug for YopHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YopHttpClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
