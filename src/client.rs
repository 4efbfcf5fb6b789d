use crate::errors::OpenRouterError;
use crate::http::common::{DEFAULT_BASE_URL, Endpoint, construct_endpoint_url};
use crate::http::transport::{HttpTransport, Transport};
use crate::request::Request;
use crate::response::Response;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Environment variable read by [`Client::from_env`].
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// The main client for the OpenRouter Responses API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    transport: Arc<dyn Transport>,
}

/// Builder for `Client` instances.
///
/// # Example
///
/// ```
/// use openrouter_responses::Client;
/// use std::time::Duration;
///
/// let client = Client::builder("api_key")
///     .timeout(Duration::from_secs(120))
///     .connect_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Overrides the API root (defaults to `https://openrouter.ai/api/v1`).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the total request timeout.
    ///
    /// Long generations can take minutes; if not set, reqwest's default
    /// (no timeout) applies.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Uses a custom transport instead of the built-in HTTP one.
    ///
    /// The API key and timeouts are then the transport's concern.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenRouterError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<Client, OpenRouterError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(
                self.api_key,
                self.timeout,
                self.connect_timeout,
            )?),
        };
        Ok(Client {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            transport,
        })
    }
}

impl Client {
    /// Creates a new builder for `Client` instances.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.into(),
            base_url: None,
            timeout: None,
            connect_timeout: None,
            transport: None,
        }
    }

    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::build`].
    pub fn new(api_key: impl Into<String>) -> Result<Self, OpenRouterError> {
        Self::builder(api_key).build()
    }

    /// Creates a client using the key in `OPENROUTER_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenRouterError::Config`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self, OpenRouterError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Self::new(key),
            _ => Err(OpenRouterError::Config(format!(
                "{API_KEY_ENV} is not set"
            ))),
        }
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `request` to `POST /responses` and decodes the result.
    ///
    /// # Errors
    ///
    /// - transport failures from the [`Transport`]
    /// - [`OpenRouterError::Api`] if the provider reports an error
    /// - [`OpenRouterError::Wire`] if the response does not match the typed model
    pub async fn create_response(&self, request: &Request) -> Result<Response, OpenRouterError> {
        let url = construct_endpoint_url(&self.base_url, Endpoint::CreateResponse);
        let body = serde_json::to_string(request)?;
        debug!(
            "Creating response (model: {:?})",
            request.model.as_deref().unwrap_or("<default>")
        );

        let raw = self.transport.post(&url, body).await?;
        let response = Response::from_body(&raw)?;

        debug!("Decoded response with {} output items", response.items().len());
        Ok(response)
    }

    /// Fetches `GET /models` as raw JSON.
    ///
    /// # Errors
    ///
    /// Transport failures, or [`OpenRouterError::Json`] if the body is not JSON.
    pub async fn list_models(&self) -> Result<serde_json::Value, OpenRouterError> {
        let url = construct_endpoint_url(&self.base_url, Endpoint::ListModels);
        let raw = self.transport.get(&url).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
