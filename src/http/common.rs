/// Default OpenRouter API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Represents the API endpoints this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /responses`
    CreateResponse,
    /// `GET /models`
    ListModels,
}

impl Endpoint {
    /// Constructs the URL path for this endpoint
    const fn path(self) -> &'static str {
        match self {
            Self::CreateResponse => "/responses",
            Self::ListModels => "/models",
        }
    }
}

/// Joins `base_url` and the endpoint path, tolerating a trailing slash on the base.
#[must_use]
pub fn construct_endpoint_url(base_url: &str, endpoint: Endpoint) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint.path())
}
