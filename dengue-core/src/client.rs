use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{
    error::FetchError,
    model::{RiskQuery, RiskReport},
};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5010";

#[async_trait]
pub trait RiskClient: Send + Sync + Debug {
    async fn fetch(&self, query: &RiskQuery) -> Result<RiskReport, FetchError>;
}

/// Resolved connection settings for [`HttpRiskClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    /// `None` waits as long as the transport does.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), timeout: None }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRiskClient {
    endpoint: Url,
    http: Client,
}

impl HttpRiskClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| anyhow::anyhow!("Invalid endpoint '{}': {e}", config.endpoint))?;
        if endpoint.cannot_be_a_base() {
            return Err(FetchError::InvalidEndpoint(config.endpoint.clone()).into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RiskClient for HttpRiskClient {
    async fn fetch(&self, query: &RiskQuery) -> Result<RiskReport, FetchError> {
        let url = request_url(&self.endpoint, query)?;
        tracing::info!(%url, "requesting risk forecast");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(%status, bytes = body.len(), "risk forecast response");

        interpret_response(status, &body)
    }
}

/// `{endpoint}/prever_risco/{neighborhood}?dias={n}` with the neighborhood
/// percent-encoded as a single path segment.
pub fn request_url(endpoint: &Url, query: &RiskQuery) -> Result<Url, FetchError> {
    let mut url = endpoint.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidEndpoint(endpoint.to_string()))?
        .pop_if_empty()
        .push("prever_risco")
        .push(&query.neighborhood);
    url.query_pairs_mut().append_pair("dias", query.horizon.as_str());
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    erro: Option<serde_json::Value>,
}

/// Turns a status and raw body into the request outcome.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<RiskReport, FetchError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| match b.erro {
                Some(serde_json::Value::String(text)) if !text.is_empty() => Some(text),
                _ => None,
            });

        return Err(match message {
            Some(text) => FetchError::Service(text),
            None => FetchError::Unknown { status },
        });
    }

    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}
