//! Canonical pass record derived from the loose check-in responses.
//!
//! The admin API returns untyped JSON objects whose field names vary between
//! snake_case and camelCase for the same semantic value. This module owns the
//! documented alias tables, the resolution rule (first present, non-null,
//! string-valued alias wins), and the merge rule applied when the completion
//! response adds fields to an existing pass.

use serde_json::Value;

/// Untyped server payload: a JSON object with no guaranteed schema.
pub type RawRecord = serde_json::Map<String, Value>;

/// Display label of the gym the pass belongs to.
pub const GYM_NAME_ALIASES: &[&str] = &["gym_name", "gymName", "location_name"];

/// Expiry instant shown as "Valid until". Absent means no expiry is shown.
pub const VALID_UNTIL_ALIASES: &[&str] = &["valid_until", "validUntil", "expires_at", "expiresAt"];

/// The pass code itself. The order here decides which field wins when a
/// response erroneously carries more than one alias, so it is a contract:
/// `pass_code` before `passCode` before `code`.
pub const PASS_CODE_ALIASES: &[&str] = &["pass_code", "passCode", "code"];

/// Ready-made QR image reference (URL or data URI) supplied by the server.
pub const QR_IMAGE_ALIASES: &[&str] = &["qr_code", "qrCode"];

/// Returns the first present, non-null, string-valued alias from `record`.
///
/// Only the aliases listed are consulted; unknown spellings are never
/// guessed. Non-string values are treated as absent since every canonical
/// field is textual.
pub fn resolve_alias(record: &RawRecord, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str).map(str::to_string))
}

/// One check-in session's pass, resolved from the submit response.
///
/// Created when a submit succeeds, mutated once if a locally generated QR
/// image is attached, merged (never replaced) with the completion response,
/// and discarded when the user backs out of the flow. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPass {
    /// Gym display label, if any alias resolved.
    pub gym_name: Option<String>,
    /// Raw expiry string as the server sent it; formatted at render time.
    pub valid_until: Option<String>,
    /// Image shown for the pass: server-supplied reference or a locally
    /// generated data URI. `None` when neither is available.
    pub qr_image: Option<String>,
    /// Every field of the submit response, kept for the completion merge.
    pub extra: RawRecord,
    // Private: the completion call must use exactly the value resolved at
    // submit time, so nothing outside this module may rewrite it.
    pass_code: String,
}

impl CanonicalPass {
    /// Resolves the canonical fields from a submit response.
    ///
    /// A missing pass code yields an empty string rather than an error; the
    /// pass is still displayable and completion fails fast locally instead.
    pub fn from_raw(record: RawRecord) -> Self {
        let gym_name = resolve_alias(&record, GYM_NAME_ALIASES);
        let valid_until = resolve_alias(&record, VALID_UNTIL_ALIASES);
        let pass_code = resolve_alias(&record, PASS_CODE_ALIASES).unwrap_or_default();
        let qr_image = resolve_alias(&record, QR_IMAGE_ALIASES);
        Self {
            gym_name,
            valid_until,
            qr_image,
            extra: record,
            pass_code,
        }
    }

    /// The code resolved at submit time. Immutable for the session.
    pub fn pass_code(&self) -> &str {
        &self.pass_code
    }

    pub fn has_pass_code(&self) -> bool {
        !self.pass_code.is_empty()
    }

    /// Attaches a locally generated image, only when the server supplied none.
    pub fn attach_generated_image(&mut self, data_url: String) {
        if self.qr_image.is_none() {
            self.qr_image = Some(data_url);
        }
    }

    /// Merges the completion response into the pass.
    ///
    /// Response fields take precedence on key collision; fields the response
    /// omits are kept, and the pass code is never rewritten.
    pub fn merge_completion(&mut self, response: RawRecord) {
        if let Some(name) = resolve_alias(&response, GYM_NAME_ALIASES) {
            self.gym_name = Some(name);
        }
        if let Some(until) = resolve_alias(&response, VALID_UNTIL_ALIASES) {
            self.valid_until = Some(until);
        }
        if let Some(image) = resolve_alias(&response, QR_IMAGE_ALIASES) {
            self.qr_image = Some(image);
        }
        for (key, value) in response {
            self.extra.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn earlier_alias_wins() {
        let raw = record(json!({ "pass_code": "A", "passCode": "B" }));
        assert_eq!(resolve_alias(&raw, PASS_CODE_ALIASES).as_deref(), Some("A"));
    }

    #[test]
    fn later_alias_used_when_earlier_absent() {
        let raw = record(json!({ "code": "C" }));
        assert_eq!(resolve_alias(&raw, PASS_CODE_ALIASES).as_deref(), Some("C"));
    }

    #[test]
    fn null_and_non_string_aliases_are_skipped() {
        let raw = record(json!({ "gym_name": null, "gymName": 7, "location_name": "Riverside" }));
        assert_eq!(
            resolve_alias(&raw, GYM_NAME_ALIASES).as_deref(),
            Some("Riverside")
        );
    }

    #[test]
    fn submit_response_resolves_canonical_fields() {
        let raw = record(json!({
            "pass_code": "XYZ123",
            "gym_name": "Riverside",
            "expires_at": "2025-01-01T10:00:00Z",
        }));
        let pass = CanonicalPass::from_raw(raw);
        assert_eq!(pass.pass_code(), "XYZ123");
        assert_eq!(pass.gym_name.as_deref(), Some("Riverside"));
        assert_eq!(pass.valid_until.as_deref(), Some("2025-01-01T10:00:00Z"));
        assert_eq!(pass.qr_image, None);
    }

    #[test]
    fn missing_pass_code_yields_empty_code() {
        let pass = CanonicalPass::from_raw(record(json!({ "gym_name": "Riverside" })));
        assert!(!pass.has_pass_code());
        assert_eq!(pass.pass_code(), "");
    }

    #[test]
    fn generated_image_attaches_only_when_absent() {
        let mut pass = CanonicalPass::from_raw(record(json!({ "pass_code": "X" })));
        pass.attach_generated_image("data:one".into());
        pass.attach_generated_image("data:two".into());
        assert_eq!(pass.qr_image.as_deref(), Some("data:one"));

        let mut served = CanonicalPass::from_raw(record(json!({
            "pass_code": "X",
            "qr_code": "https://img.example/x.png",
        })));
        served.attach_generated_image("data:local".into());
        assert_eq!(served.qr_image.as_deref(), Some("https://img.example/x.png"));
    }

    #[test]
    fn merge_keeps_pass_code_when_response_omits_it() {
        let mut pass = CanonicalPass::from_raw(record(json!({ "pass_code": "XYZ123" })));
        pass.merge_completion(record(json!({ "checked_in_at": "2025-01-01T09:00:00Z" })));
        assert_eq!(pass.pass_code(), "XYZ123");
        assert_eq!(
            pass.extra.get("checked_in_at").and_then(Value::as_str),
            Some("2025-01-01T09:00:00Z")
        );
    }

    #[test]
    fn merge_never_rewrites_pass_code() {
        let mut pass = CanonicalPass::from_raw(record(json!({ "pass_code": "XYZ123" })));
        pass.merge_completion(record(json!({ "pass_code": "OTHER" })));
        assert_eq!(pass.pass_code(), "XYZ123");
    }

    #[test]
    fn merge_response_fields_take_precedence() {
        let mut pass = CanonicalPass::from_raw(record(json!({
            "pass_code": "X",
            "gym_name": "Riverside",
            "note": "old",
        })));
        pass.merge_completion(record(json!({ "gym_name": "Downtown", "note": "new" })));
        assert_eq!(pass.gym_name.as_deref(), Some("Downtown"));
        assert_eq!(pass.extra.get("note").and_then(Value::as_str), Some("new"));
    }
}
