//! Component state for the check-in page.
//!
//! The two-phase protocol state lives in `common::flow::Flow`, the single
//! source of truth every UI flag is derived from. The fields here are the
//! acquisition-side state: which mode is active, the manual input buffer,
//! the owned scanner resource, and the request generation counter.

use common::flow::Flow;

use crate::api::DEFAULT_API_BASE;

use super::props::CheckInProps;
use super::scanner::ScannerHandle;

/// How the candidate code is acquired. The two modes are mutually
/// exclusive; `None` shows the selection screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquireMode {
    Scan,
    Manual,
}

pub struct CheckInComponent {
    /// Active acquisition mode, `None` on the selection screen.
    pub mode: Option<AcquireMode>,

    /// Manual-entry input buffer. Cleared once a submission fires.
    pub manual_code: String,

    /// The check-in protocol state machine.
    pub flow: Flow,

    /// Acquisition or submit-phase error shown inline. Completion errors
    /// live on the flow, attached to the pass view.
    pub error: Option<String>,

    /// The running camera scanner. Owned exclusively by this component;
    /// `release_scanner` is the only stop path.
    pub scanner: Option<ScannerHandle>,

    /// Camera acquisition in progress (stream not yet delivering frames).
    pub scanner_starting: bool,

    /// Generation counter. Bumped on every reset so responses from an
    /// abandoned session are recognized and discarded.
    pub seq: u32,

    /// Admin API host the requests go to.
    pub api_base: String,
}

impl CheckInComponent {
    pub fn new(props: &CheckInProps) -> Self {
        Self {
            mode: None,
            manual_code: String::new(),
            flow: Flow::Idle,
            error: None,
            scanner: None,
            scanner_starting: false,
            seq: 0,
            api_base: props
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    /// Single release path for the camera. Safe to call on every exit
    /// route; a missing scanner is a no-op.
    pub fn release_scanner(&mut self) {
        if let Some(scanner) = self.scanner.take() {
            scanner.release();
        }
        self.scanner_starting = false;
    }
}
