use common::error::CheckInError;
use common::model::pass::RawRecord;

use super::scanner::ScannerHandle;
use super::state::AcquireMode;

pub enum Msg {
    SelectMode(AcquireMode),
    Back,
    UpdateManualCode(String),
    SubmitManual,
    ScannerStarted(ScannerHandle),
    ScannerFailed(String),
    CodeDetected(String),
    SubmitResolved {
        seq: u32,
        result: Result<RawRecord, CheckInError>,
    },
    Complete,
    CompleteResolved {
        seq: u32,
        result: Result<RawRecord, CheckInError>,
    },
}
