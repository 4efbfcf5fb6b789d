use thiserror::Error;

/// Failures raised while decoding wire JSON into the typed model.
///
/// All but [`WireError::Api`] are schema failures. Every variant aborts the
/// enclosing decode; no partially built value is ever returned. Paths are
/// JSONPath-like (`$.output[0].content[1]`) and point at the object that was
/// being read when the failure occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WireError {
    /// A required key is absent or `null`.
    #[error("missing required field `{field}` at {path}")]
    MissingField { path: String, field: String },

    /// A value has the wrong JSON shape (e.g. a number where a string was expected).
    #[error("type mismatch at {path}: expected {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    /// A `type` discriminator does not name any member of the union being decoded.
    #[error("unknown {union} variant `{discriminator}`")]
    UnknownVariant {
        union: &'static str,
        discriminator: String,
    },

    /// A string-valued enumeration holds a literal outside its closed set.
    #[error("unknown {enum_name} value `{value}`")]
    UnknownEnumValue { enum_name: String, value: String },

    /// A response document carried the provider's `error` envelope.
    #[error("provider error: {message}")]
    Api {
        message: String,
        code: Option<String>,
    },
}

impl WireError {
    pub(crate) fn missing(path: &str, field: &str) -> Self {
        Self::MissingField {
            path: path.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn mismatch(path: &str, expected: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.to_string(),
            expected,
        }
    }

    pub(crate) fn unknown_variant(union: &'static str, discriminator: &str) -> Self {
        Self::UnknownVariant {
            union,
            discriminator: discriminator.to_string(),
        }
    }
}

/// Defines errors that can occur when talking to the OpenRouter Responses API.
///
/// # Example: Handling API Errors
///
/// ```ignore
/// match client.create_response(&request).await {
///     Err(OpenRouterError::Api { status_code: Some(429), message, .. }) => {
///         tracing::warn!("Rate limited: {}", message);
///     }
///     Err(OpenRouterError::Wire(WireError::UnknownVariant { union, discriminator })) => {
///         tracing::error!("Provider sent an unsupported {} `{}`", union, discriminator);
///     }
///     // ...
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpenRouterError {
    /// Network or IO failure inside the transport.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    /// The body was not valid JSON at all.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The body was JSON but did not match the typed model.
    #[error("Malformed API payload: {0}")]
    Wire(#[source] WireError),
    /// The provider reported a failure, either through its `error` envelope
    /// or through a non-success HTTP status.
    #[error("API error{}: {message}", .status_code.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Api {
        /// HTTP status code, when the failure came with one.
        status_code: Option<u16>,
        /// The provider's `error.message`, or a preview of the body.
        message: String,
        /// The provider's `error.code`, if any.
        code: Option<String>,
    },
    /// The client could not be configured (e.g. no API key available).
    #[error("Configuration error: {0}")]
    Config(String),
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<WireError> for OpenRouterError {
    fn from(error: WireError) -> Self {
        match error {
            WireError::Api { message, code } => OpenRouterError::Api {
                status_code: None,
                message,
                code,
            },
            other => OpenRouterError::Wire(other),
        }
    }
}

impl OpenRouterError {
    /// Returns `true` if this error is likely transient and the request may succeed on retry.
    ///
    /// Transport failures, rate limits (429) and server errors (5xx) are
    /// retryable. Schema errors never are: a payload that failed to decode
    /// will fail the same way again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenRouterError::Http(_) => true,
            OpenRouterError::Api {
                status_code: Some(status),
                ..
            } => *status == 429 || *status >= 500,
            OpenRouterError::Api { .. }
            | OpenRouterError::Json(_)
            | OpenRouterError::Wire(_)
            | OpenRouterError::Config(_)
            | OpenRouterError::ClientBuild(_) => false,
        }
    }

    /// Returns the wire error if this failure came from decoding the payload.
    #[must_use]
    pub fn as_wire(&self) -> Option<&WireError> {
        match self {
            OpenRouterError::Wire(e) => Some(e),
            _ => None,
        }
    }
}
