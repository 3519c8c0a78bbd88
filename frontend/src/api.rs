//! HTTP client for the two check-in endpoints of the remote admin API.
//!
//! The protocol carries the caller identity and the candidate code as
//! request headers with an empty JSON body; responses are loose JSON
//! objects. Non-2xx responses go through the message fallback chain in
//! `common::error` before being surfaced.

use common::error::{resolve_error_message, CheckInError};
use common::model::pass::RawRecord;
use gloo_net::http::Request;

/// The admin API host. Overridable per component via `CheckInProps`.
pub const DEFAULT_API_BASE: &str = "https://api.any-gym.com";

/// Phase one: look up and reserve the pass behind `code`.
pub async fn submit_check_in(
    base: &str,
    identity: &str,
    code: &str,
) -> Result<RawRecord, CheckInError> {
    post_check_in(
        &format!("{base}/admin/check_in"),
        identity,
        code,
        "Check-in failed",
    )
    .await
}

/// Phase two: confirm attendance against the code resolved at submit time.
pub async fn complete_check_in(
    base: &str,
    identity: &str,
    code: &str,
) -> Result<RawRecord, CheckInError> {
    post_check_in(
        &format!("{base}/admin/check_in/complete"),
        identity,
        code,
        "Check-in completion failed",
    )
    .await
}

async fn post_check_in(
    url: &str,
    identity: &str,
    code: &str,
    verb: &str,
) -> Result<RawRecord, CheckInError> {
    let response = Request::post(url)
        .header("Content-Type", "application/json")
        .header("auth0_id", identity)
        .header("pass_code", code)
        .send()
        .await
        .map_err(|err| CheckInError::Transport(err.to_string()))?;

    if response.ok() {
        response
            .json::<RawRecord>()
            .await
            .map_err(|err| CheckInError::Transport(err.to_string()))
    } else {
        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();
        Err(CheckInError::Server {
            status,
            message: resolve_error_message(verb, status, &status_text, &body),
        })
    }
}
