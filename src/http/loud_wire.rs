//! Wire-level debugging via the `LOUD_WIRE` environment variable.
//!
//! When `LOUD_WIRE` is set to any value, the raw JSON of requests and
//! responses is pretty-printed to stderr with colors.
//!
//! ```bash
//! LOUD_WIRE=1 cargo run --example simple_response
//! ```
//!
//! Green `>>>` marks outgoing requests, red `<<<` incoming responses. Inline
//! base64 payloads (file data, audio, generated images, encrypted reasoning)
//! are truncated to keep the output readable.

use colored::Colorize;
use serde_json::Value;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(1);

static ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether `LOUD_WIRE` is set. Cached on first call.
#[must_use]
pub fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var("LOUD_WIRE").is_ok())
}

/// Next correlation id for pairing a request with its response.
#[must_use]
pub fn next_request_id() -> usize {
    REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Fields whose string values are usually base64 blobs.
const TRUNCATE_FIELDS: &[&str] = &[
    "data",
    "file_data",
    "encrypted_content",
    "result",
    "signature",
];

const TRUNCATE_THRESHOLD: usize = 100;

fn truncate_long_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if TRUNCATE_FIELDS.contains(&key.as_str()) {
                    if let Value::String(s) = val
                        && s.len() > TRUNCATE_THRESHOLD
                    {
                        *s = format!("{}...", truncate_at_boundary(s, TRUNCATE_THRESHOLD));
                    }
                } else {
                    truncate_long_fields(val);
                }
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                truncate_long_fields(item);
            }
        }
        _ => {}
    }
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
fn truncate_at_boundary(s: &str, max: usize) -> &str {
    let mut end = max.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

fn prefix(request_id: usize) -> String {
    format!(
        "{} {} {}",
        "[LOUD_WIRE]".bold(),
        timestamp().dimmed(),
        format!("[REQ#{request_id}]").cyan()
    )
}

fn print_body(prefix: &str, label: &str, body: &str, raw_limit: usize) {
    match serde_json::from_str::<Value>(body) {
        Ok(mut parsed) => {
            truncate_long_fields(&mut parsed);
            eprintln!("{prefix} {label}:");
            let rendered = colored_json::to_colored_json_auto(&parsed)
                .ok()
                .or_else(|| serde_json::to_string_pretty(&parsed).ok());
            if let Some(rendered) = rendered {
                for line in rendered.lines() {
                    eprintln!("{prefix} {line}");
                }
            }
        }
        Err(_) => {
            let shown = truncate_at_boundary(body, raw_limit);
            let ellipsis = if shown.len() < body.len() { "..." } else { "" };
            eprintln!("{prefix} {label}: {shown}{ellipsis}");
        }
    }
}

/// Logs an outgoing request.
pub fn log_request(request_id: usize, method: &str, url: &str, body: Option<&str>) {
    if !is_enabled() {
        return;
    }
    let prefix = prefix(request_id);
    eprintln!("{prefix} {} {method} {url}", ">>>".green().bold());
    if let Some(body) = body {
        print_body(&prefix, &"Body".green().to_string(), body, 500);
    }
}

/// Logs the status line of a response.
pub fn log_response_status(request_id: usize, status: u16) {
    if !is_enabled() {
        return;
    }
    let status_text = if status < 300 {
        format!("{status} OK").green()
    } else {
        format!("{status} ERROR").red()
    };
    eprintln!("{} {} {status_text}", prefix(request_id), "<<<".red().bold());
}

/// Logs a response body.
pub fn log_response_body(request_id: usize, body: &str) {
    if !is_enabled() {
        return;
    }
    print_body(&prefix(request_id), &"Response".red().to_string(), body, 1000);
}
