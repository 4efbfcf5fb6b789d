//! The network collaborator.
//!
//! The codec only needs two operations, `post(url, body) -> body` and
//! `get(url) -> body`. [`HttpTransport`] implements them over reqwest with
//! bearer authentication; tests and alternative backends can supply their
//! own [`Transport`].

use super::error_helpers::error_from_body;
use super::loud_wire;
use crate::errors::OpenRouterError;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// Moves raw request/response bodies over the network.
///
/// Implementations return the body of a successful response. Non-success
/// statuses should be mapped to [`OpenRouterError::Api`] and network
/// failures to [`OpenRouterError::Http`].
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn post(&self, url: &str, body: String) -> Result<String, OpenRouterError>;

    async fn get(&self, url: &str) -> Result<String, OpenRouterError>;
}

/// reqwest-backed [`Transport`] that authenticates with a bearer token.
#[derive(Clone)]
pub struct HttpTransport {
    api_key: String,
    http_client: ReqwestClient,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Builds a transport with optional timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`OpenRouterError::ClientBuild`] if the TLS backend cannot be
    /// initialized.
    pub fn new(
        api_key: String,
        timeout: Option<Duration>,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, OpenRouterError> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| OpenRouterError::ClientBuild(e.to_string()))?;
        Ok(Self {
            api_key,
            http_client,
        })
    }

    async fn finish(
        request_id: usize,
        response: reqwest::Response,
    ) -> Result<String, OpenRouterError> {
        let status = response.status();
        loud_wire::log_response_status(request_id, status.as_u16());
        debug!("Response status: {}", status);

        let body = response.text().await?;
        loud_wire::log_response_body(request_id, &body);

        if status.is_success() {
            Ok(body)
        } else {
            Err(error_from_body(status.as_u16(), &body))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: String) -> Result<String, OpenRouterError> {
        let request_id = loud_wire::next_request_id();
        loud_wire::log_request(request_id, "POST", url, Some(&body));
        debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .http_client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        Self::finish(request_id, response).await
    }

    async fn get(&self, url: &str) -> Result<String, OpenRouterError> {
        let request_id = loud_wire::next_request_id();
        loud_wire::log_request(request_id, "GET", url, None);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await?;

        Self::finish(request_id, response).await
    }
}
