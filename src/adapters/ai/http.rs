//! Shared HTTP plumbing for the hosted providers.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response};
use std::time::Duration;

use crate::ports::AIError;

/// Builds the client used for one provider.
pub(super) fn build_client(timeout: Duration) -> Result<Client, AIError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AIError::InvalidRequest(format!("failed to create HTTP client: {}", e)))
}

/// Maps a transport failure onto the port's error type.
pub(super) fn send_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Passes successful responses through and classifies the rest.
///
/// `context_markers` are substrings of a 400 body that identify an oversized
/// prompt for the given provider.
pub(super) async fn check_status(
    response: Response,
    context_markers: &[&str],
    default_retry_after: u32,
) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let header_retry_after = retry_after_header(response.headers());
    let error_body = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => Err(AIError::AuthenticationFailed),
        429 => Err(AIError::rate_limited(
            header_retry_after
                .or_else(|| parse_retry_after(&error_body))
                .unwrap_or(default_retry_after),
        )),
        400 if context_markers.iter().any(|m| error_body.contains(m)) => {
            Err(AIError::context_too_long(0, 0))
        }
        400 => Err(AIError::InvalidRequest(error_body)),
        500..=599 => Err(AIError::unavailable(format!(
            "Server error {}: {}",
            status, error_body
        ))),
        _ => Err(AIError::network(format!(
            "Unexpected status {}: {}",
            status, error_body
        ))),
    }
}

/// Seconds from a numeric `Retry-After` header. HTTP-date values are ignored.
pub(super) fn retry_after_header(headers: &HeaderMap) -> Option<u32> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()
}

/// Extracts N from a "try again in Ns" hint in a provider error body.
pub(super) fn parse_retry_after(error_body: &str) -> Option<u32> {
    let parsed: serde_json::Value = serde_json::from_str(error_body).ok()?;
    let message = parsed.get("error")?.get("message")?.as_str()?;
    let rest = &message[message.find("try again in ")? + 13..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Cost in cents for a call priced per million tokens.
pub(super) fn cost_cents(
    prompt_tokens: u32,
    completion_tokens: u32,
    (prompt_price, completion_price): (u64, u64),
) -> u32 {
    let prompt_cost = (prompt_tokens as u64 * prompt_price) / 1_000_000;
    let completion_cost = (completion_tokens as u64 * completion_price) / 1_000_000;
    (prompt_cost + completion_cost) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 30 seconds."}}"#;
        assert_eq!(parse_retry_after(error), Some(30));
    }

    #[test]
    fn parse_retry_after_missing_hint() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(parse_retry_after(error), None);
        assert_eq!(parse_retry_after("not json"), None);
    }

    #[test]
    fn retry_after_header_reads_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after_header(&headers), None);

        headers.insert(RETRY_AFTER, reqwest::header::HeaderValue::from_static("17"));
        assert_eq!(retry_after_header(&headers), Some(17));

        headers.insert(
            RETRY_AFTER,
            reqwest::header::HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after_header(&headers), None);
    }

    #[test]
    fn cost_is_rounded_down_per_side() {
        // (1000 * 1000) / 1M = 1, (500 * 3000) / 1M = 1
        assert_eq!(cost_cents(1000, 500, (1000, 3000)), 2);
        assert_eq!(cost_cents(100_000, 100_000, (50, 150)), 20);
    }
}
