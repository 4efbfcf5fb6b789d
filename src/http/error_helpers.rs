//! Turning non-success HTTP responses into structured errors.

use crate::errors::OpenRouterError;
use crate::response::api_error;

/// Maximum characters of an unparseable error body kept in the message.
const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

/// Builds the error for a non-success status from the response body.
///
/// OpenRouter error bodies look like
/// `{"error": {"message": "...", "code": 429}}`; when the body has that shape
/// the provider message is used, otherwise a truncated preview of the body.
pub(crate) fn error_from_body(status_code: u16, body: &str) -> OpenRouterError {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| api_error(&value, Some(status_code)))
        .unwrap_or_else(|| OpenRouterError::Api {
            status_code: Some(status_code),
            message: truncate_for_context(body, ERROR_BODY_PREVIEW_LENGTH),
            code: None,
        })
}

/// Truncates a string to `max_len` bytes on a char boundary, adding "..." if truncated.
pub(crate) fn truncate_for_context(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let truncate_at = s
            .char_indices()
            .take_while(|(i, c)| i + c.len_utf8() <= max_len)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &s[..truncate_at])
    }
}
