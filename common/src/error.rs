//! Error taxonomy for the check-in flow.
//!
//! Nothing here is fatal to the page: every variant resolves to an inline,
//! user-visible, recoverable message. The `Display` text of each variant is
//! exactly what the UI shows.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckInError {
    /// Local input problem: empty manual code, missing pass code at
    /// completion time. Never involves a network call.
    #[error("{0}")]
    Validation(String),

    /// Network or connectivity failure on submit or completion.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response; `message` already went through the fallback chain.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Camera permission or hardware failure while starting scan mode.
    #[error("{0}")]
    Capture(String),
}

/// Structured error body the API may return for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Resolves a human-readable message for a non-2xx response.
///
/// Fallback chain: a structured `message` or `error` field in the body, then
/// the raw body text when non-empty, then `"{verb}: {status} {status_text}"`.
pub fn resolve_error_message(verb: &str, status: u16, status_text: &str, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }
    let raw = body.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }
    format!("{verb}: {status} {status_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_message_field_wins() {
        let text = resolve_error_message(
            "Check-in failed",
            404,
            "Not Found",
            r#"{"message":"Pass not found"}"#,
        );
        assert_eq!(text, "Pass not found");
    }

    #[test]
    fn error_field_used_when_message_absent() {
        let text = resolve_error_message(
            "Check-in failed",
            403,
            "Forbidden",
            r#"{"error":"Pass already used"}"#,
        );
        assert_eq!(text, "Pass already used");
    }

    #[test]
    fn plain_text_body_is_surfaced() {
        let text = resolve_error_message("Check-in failed", 400, "Bad Request", "bad pass code");
        assert_eq!(text, "bad pass code");
    }

    #[test]
    fn empty_unparsable_body_falls_back_to_status_line() {
        let text = resolve_error_message("Check-in failed", 500, "Internal Server Error", "");
        assert_eq!(text, "Check-in failed: 500 Internal Server Error");
    }

    #[test]
    fn completion_verb_substituted() {
        let text = resolve_error_message("Check-in completion failed", 502, "Bad Gateway", "  ");
        assert_eq!(text, "Check-in completion failed: 502 Bad Gateway");
    }

    #[test]
    fn structured_body_without_known_keys_surfaces_raw_text() {
        let body = r#"{"detail":"nope"}"#;
        let text = resolve_error_message("Check-in failed", 422, "Unprocessable Entity", body);
        assert_eq!(text, body);
    }

    #[test]
    fn server_error_displays_resolved_message_only() {
        let err = CheckInError::Server {
            status: 404,
            message: "Pass not found".into(),
        };
        assert_eq!(err.to_string(), "Pass not found");
    }
}
