//! HTTP plumbing for upstream API calls.
//!
//! A thin wrapper around reqwest that logs requests, checks status codes,
//! and parses JSON bodies. Failures here all surface as a single kind of
//! error to the rest of the app; [`format_api_error`] turns them into the
//! text the error view displays.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

/// Maximum response body length to include in logs.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate and sanitize a response body for logging.
fn sanitize_for_log(body: &str) -> String {
    let truncated: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
    truncated
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// HTTP client for JSON GET requests.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("mortui/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// GET a URL and parse the response body as JSON.
    pub async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            anyhow::bail!("API request failed: {}", status.as_u16());
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

/// Map a fetch failure to the text the error view displays.
///
/// Status failures keep the code visible so the user can tell "nothing
/// matched" from "the API is down"; everything else surfaces the deepest
/// cause in the error chain.
pub fn format_api_error(error: &anyhow::Error) -> String {
    let text = error.to_string();

    if let Some(code) = text.strip_prefix("API request failed: ") {
        let hint = match code {
            "404" => "nothing was found at this address",
            "429" => "rate limit exceeded, try again shortly",
            c if c.starts_with('5') => "the API is temporarily unavailable",
            _ => "the request was rejected",
        };
        return format!("The API answered {} ({})", code, hint);
    }

    if text.contains("Failed to parse response JSON") {
        return "The API returned a response that was not valid JSON".to_string();
    }

    let cause = error
        .chain()
        .last()
        .map(|c| c.to_string())
        .unwrap_or(text);
    let sanitized: String = cause
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect();
    format!("Network error: {}", sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_not_found() {
        let err = anyhow::anyhow!("API request failed: 404");
        let msg = format_api_error(&err);
        assert!(msg.contains("404"));
        assert!(msg.contains("nothing was found"));
    }

    #[test]
    fn formats_server_errors() {
        for code in ["500", "502", "503"] {
            let err = anyhow::anyhow!("API request failed: {}", code);
            let msg = format_api_error(&err);
            assert!(msg.contains(code));
            assert!(msg.contains("temporarily unavailable"));
        }
    }

    #[test]
    fn formats_other_statuses_generically() {
        let err = anyhow::anyhow!("API request failed: 418");
        let msg = format_api_error(&err);
        assert!(msg.contains("418"));
        assert!(msg.contains("rejected"));
    }

    #[test]
    fn formats_parse_failures() {
        let err = anyhow::anyhow!("boom").context("Failed to parse response JSON");
        assert!(format_api_error(&err).contains("not valid JSON"));
    }

    #[test]
    fn network_errors_surface_root_cause() {
        let err = anyhow::anyhow!("connection refused").context("Failed to send request");
        let msg = format_api_error(&err);
        assert!(msg.starts_with("Network error:"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn sanitize_strips_control_characters() {
        let sanitized = sanitize_for_log("line1\nline2\tend");
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\t'));
    }

    #[test]
    fn sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        assert_eq!(sanitize_for_log(&body).len(), MAX_LOG_BODY_LENGTH);
    }
}
