//! The two-phase check-in state machine.
//!
//! One enumerated state is the single source of truth for the whole flow;
//! the UI derives every flag (busy spinners, disabled buttons, banners) from
//! it, so contradictory combinations cannot be represented. Transitions also
//! enforce single-flight: a second submit or completion cannot start while
//! one is pending.
//!
//! ```text
//! Idle --begin_submit--> Submitting --submit_succeeded--> PendingCompletion
//!   ^                        |                                 |      ^
//!   +----submit_failed-------+          completion_failed------+------+
//!                                                             |
//!                            completion_succeeded --> Completed
//! ```
//!
//! There is no path back to `Submitting` without a fresh code acquisition;
//! `reset` (back-action or mode switch) drops all derived data.

use crate::model::pass::{CanonicalPass, RawRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// No check-in in progress; a code may be acquired.
    Idle,
    /// Submit request in flight.
    Submitting,
    /// Submit succeeded; the pass is displayed and awaits confirmation.
    PendingCompletion {
        pass: CanonicalPass,
        /// Completion request in flight; the trigger is disabled meanwhile.
        completing: bool,
        /// Completion-specific error, attached to the pass view.
        error: Option<String>,
    },
    /// Completion confirmed by the server; success banner shown.
    Completed { pass: CanonicalPass },
}

impl Flow {
    /// Starts a submit. Returns `false` when one is already in flight or a
    /// pass is already on screen; the caller must not issue a request then.
    pub fn begin_submit(&mut self) -> bool {
        match self {
            Flow::Idle => {
                *self = Flow::Submitting;
                true
            }
            _ => false,
        }
    }

    pub fn submit_succeeded(&mut self, pass: CanonicalPass) {
        if matches!(self, Flow::Submitting) {
            *self = Flow::PendingCompletion {
                pass,
                completing: false,
                error: None,
            };
        }
    }

    /// Failed submit returns to `Idle`; the user must reacquire a code.
    pub fn submit_failed(&mut self) {
        if matches!(self, Flow::Submitting) {
            *self = Flow::Idle;
        }
    }

    /// Starts a completion, returning the code to send.
    ///
    /// Returns `None` without any network call when no pass exists, when a
    /// completion is already in flight, or when the pass code never resolved
    /// (that last case records "Pass code not found" on the pass view).
    /// A `Completed` pass still yields its code: the client places no guard
    /// against a repeated completion, the server owns idempotency.
    pub fn begin_completion(&mut self) -> Option<String> {
        match self {
            Flow::PendingCompletion {
                pass,
                completing,
                error,
            } => {
                if *completing {
                    return None;
                }
                if !pass.has_pass_code() {
                    *error = Some("Pass code not found".to_string());
                    return None;
                }
                *completing = true;
                *error = None;
                Some(pass.pass_code().to_string())
            }
            Flow::Completed { pass } => Some(pass.pass_code().to_string()),
            _ => None,
        }
    }

    /// Merges the completion response into the pass and marks the flow done.
    pub fn completion_succeeded(&mut self, response: RawRecord) {
        match self {
            Flow::PendingCompletion { pass, .. } | Flow::Completed { pass } => {
                pass.merge_completion(response);
                let pass = pass.clone();
                *self = Flow::Completed { pass };
            }
            _ => {}
        }
    }

    /// Failed completion stays in `PendingCompletion`: the pass remains
    /// visible and the user may retry any number of times.
    pub fn completion_failed(&mut self, message: String) {
        if let Flow::PendingCompletion {
            completing, error, ..
        } = self
        {
            *completing = false;
            *error = Some(message);
        }
    }

    /// Back-action or mode switch: all derived data is discarded.
    pub fn reset(&mut self) {
        *self = Flow::Idle;
    }

    pub fn pass(&self) -> Option<&CanonicalPass> {
        match self {
            Flow::PendingCompletion { pass, .. } | Flow::Completed { pass } => Some(pass),
            _ => None,
        }
    }

    pub fn completion_error(&self) -> Option<&str> {
        match self {
            Flow::PendingCompletion { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Flow::Submitting)
    }

    pub fn is_completing(&self) -> bool {
        matches!(self, Flow::PendingCompletion { completing: true, .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Flow::Completed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRecord {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn pass_with_code(code: &str) -> CanonicalPass {
        CanonicalPass::from_raw(raw(json!({ "pass_code": code })))
    }

    #[test]
    fn only_one_submit_may_be_in_flight() {
        let mut flow = Flow::Idle;
        assert!(flow.begin_submit());
        assert!(!flow.begin_submit());
        assert!(flow.is_submitting());
    }

    #[test]
    fn failed_submit_returns_to_idle() {
        let mut flow = Flow::Idle;
        flow.begin_submit();
        flow.submit_failed();
        assert_eq!(flow, Flow::Idle);
        // No automatic retry: a fresh acquisition is required, and allowed.
        assert!(flow.begin_submit());
    }

    #[test]
    fn no_second_submit_while_pass_displayed() {
        let mut flow = Flow::Idle;
        flow.begin_submit();
        flow.submit_succeeded(pass_with_code("XYZ123"));
        assert!(!flow.begin_submit());
        assert_eq!(flow.pass().map(CanonicalPass::pass_code), Some("XYZ123"));
    }

    #[test]
    fn completion_before_any_submit_yields_nothing() {
        let mut flow = Flow::Idle;
        assert_eq!(flow.begin_completion(), None);
        let mut submitting = Flow::Submitting;
        assert_eq!(submitting.begin_completion(), None);
    }

    #[test]
    fn completion_without_pass_code_is_a_local_error() {
        let mut flow = Flow::PendingCompletion {
            pass: CanonicalPass::from_raw(raw(json!({ "gym_name": "Riverside" }))),
            completing: false,
            error: None,
        };
        assert_eq!(flow.begin_completion(), None);
        assert_eq!(flow.completion_error(), Some("Pass code not found"));
        assert!(!flow.is_completing());
    }

    #[test]
    fn completion_is_single_flight() {
        let mut flow = Flow::PendingCompletion {
            pass: pass_with_code("XYZ123"),
            completing: false,
            error: None,
        };
        assert_eq!(flow.begin_completion().as_deref(), Some("XYZ123"));
        assert!(flow.is_completing());
        assert_eq!(flow.begin_completion(), None);
    }

    #[test]
    fn completion_failure_keeps_pass_and_allows_retry() {
        let mut flow = Flow::PendingCompletion {
            pass: pass_with_code("XYZ123"),
            completing: false,
            error: None,
        };
        flow.begin_completion();
        flow.completion_failed("Check-in completion failed: 502 Bad Gateway".into());
        assert_eq!(
            flow.completion_error(),
            Some("Check-in completion failed: 502 Bad Gateway")
        );
        assert!(!flow.is_completed());
        // Retry clears the previous error.
        assert_eq!(flow.begin_completion().as_deref(), Some("XYZ123"));
        assert_eq!(flow.completion_error(), None);
    }

    #[test]
    fn successful_completion_merges_and_completes() {
        let mut flow = Flow::PendingCompletion {
            pass: pass_with_code("XYZ123"),
            completing: true,
            error: None,
        };
        flow.completion_succeeded(raw(json!({ "gym_name": "Riverside" })));
        assert!(flow.is_completed());
        let pass = flow.pass().unwrap();
        assert_eq!(pass.pass_code(), "XYZ123");
        assert_eq!(pass.gym_name.as_deref(), Some("Riverside"));
    }

    #[test]
    fn second_completion_after_success_still_merges() {
        let mut flow = Flow::PendingCompletion {
            pass: pass_with_code("XYZ123"),
            completing: true,
            error: None,
        };
        flow.completion_succeeded(raw(json!({})));
        assert!(flow.is_completed());

        // No client-side double-completion guard.
        assert_eq!(flow.begin_completion().as_deref(), Some("XYZ123"));
        flow.completion_succeeded(raw(json!({ "visits": "2" })));
        assert!(flow.is_completed());
        let pass = flow.pass().unwrap();
        assert_eq!(pass.pass_code(), "XYZ123");
        assert_eq!(
            pass.extra.get("visits").and_then(serde_json::Value::as_str),
            Some("2")
        );
    }

    #[test]
    fn reset_discards_everything() {
        let mut flow = Flow::PendingCompletion {
            pass: pass_with_code("XYZ123"),
            completing: false,
            error: Some("x".into()),
        };
        flow.reset();
        assert_eq!(flow, Flow::Idle);
        assert!(flow.pass().is_none());
    }

    #[test]
    fn stale_results_do_not_move_a_reset_flow() {
        // A response landing after the user backed out is disregarded.
        let mut flow = Flow::Idle;
        flow.submit_succeeded(pass_with_code("LATE"));
        assert_eq!(flow, Flow::Idle);
        flow.completion_succeeded(raw(json!({ "pass_code": "LATE" })));
        assert_eq!(flow, Flow::Idle);
        flow.completion_failed("late error".into());
        assert_eq!(flow, Flow::Idle);
    }
}
