//! Update function for the check-in component.
//!
//! Elm-style: receives the current state, the `Context`, and a `Msg`,
//! mutates the state, returns whether the view should re-render.
//!
//! Sequencing rules enforced here
//! - One submit in flight per session: `Flow::begin_submit` refuses a
//!   second, and the scanner is released before any request is issued.
//! - One completion in flight per session: `Flow::begin_completion` gates
//!   the button.
//! - Responses from an abandoned session (the user pressed Back while a
//!   request was pending) carry a stale `seq` and are discarded; the flow
//!   they would have applied to no longer exists.
//! - The camera is released on every exit route through
//!   `CheckInComponent::release_scanner`.

use common::error::CheckInError;
use common::model::pass::CanonicalPass;
use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::identity::caller_identity;

use super::messages::Msg;
use super::qr;
use super::scanner::ScannerHandle;
use super::state::{AcquireMode, CheckInComponent};

pub fn update(
    component: &mut CheckInComponent,
    ctx: &Context<CheckInComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::SelectMode(mode) => {
            component.mode = Some(mode);
            component.error = None;
            // The scanner itself starts from `rendered`, once its viewport
            // element exists in the DOM.
            true
        }
        Msg::Back => {
            component.release_scanner();
            component.mode = None;
            component.manual_code.clear();
            component.error = None;
            component.seq = component.seq.wrapping_add(1);
            component.flow.reset();
            true
        }
        Msg::UpdateManualCode(value) => {
            component.manual_code = value;
            true
        }
        Msg::SubmitManual => {
            let code = component.manual_code.trim().to_string();
            if code.is_empty() {
                let err = CheckInError::Validation("Please enter a pass code".to_string());
                component.error = Some(err.to_string());
                return true;
            }
            component.manual_code.clear();
            start_submit(component, ctx, code);
            true
        }
        Msg::ScannerStarted(handle) => {
            component.scanner_starting = false;
            // The user may have backed out while the camera was opening.
            if component.mode != Some(AcquireMode::Scan) || component.scanner.is_some() {
                handle.release();
                return false;
            }
            component.scanner = Some(handle);
            true
        }
        Msg::ScannerFailed(message) => {
            component.scanner_starting = false;
            if component.mode == Some(AcquireMode::Scan) {
                component.error = Some(message);
                return true;
            }
            false
        }
        Msg::CodeDetected(code) => {
            // The scanner latched its once-only guard before emitting this;
            // release the camera before the request goes out.
            component.release_scanner();
            start_submit(component, ctx, code);
            true
        }
        Msg::SubmitResolved { seq, result } => {
            if seq != component.seq || !component.flow.is_submitting() {
                return false;
            }
            match result {
                Ok(raw) => {
                    let mut pass = CanonicalPass::from_raw(raw);
                    if pass.qr_image.is_none() && pass.has_pass_code() {
                        // Non-fatal: the textual code is still usable.
                        match qr::pass_code_data_url(pass.pass_code()) {
                            Ok(url) => pass.attach_generated_image(url),
                            Err(err) => error!("Error generating QR code:", err.to_string()),
                        }
                    }
                    component.flow.submit_succeeded(pass);
                }
                Err(err) => {
                    component.flow.submit_failed();
                    component.error = Some(err.to_string());
                }
            }
            true
        }
        Msg::Complete => {
            let Some(code) = component.flow.begin_completion() else {
                // Local validation or an already-pending completion; the
                // flow recorded whatever there is to show.
                return true;
            };
            let seq = component.seq;
            let api_base = component.api_base.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let identity = caller_identity();
                let result = api::complete_check_in(&api_base, &identity, &code).await;
                link.send_message(Msg::CompleteResolved { seq, result });
            });
            true
        }
        Msg::CompleteResolved { seq, result } => {
            if seq != component.seq {
                return false;
            }
            match result {
                Ok(raw) => component.flow.completion_succeeded(raw),
                Err(err) => component.flow.completion_failed(err.to_string()),
            }
            true
        }
    }
}

/// Starts the camera when scan mode needs it. Called after every render;
/// the guards keep it from double-acquiring or restarting over an error.
pub fn maybe_start_scanner(component: &mut CheckInComponent, ctx: &Context<CheckInComponent>) {
    let wanted = component.mode == Some(AcquireMode::Scan)
        && component.scanner.is_none()
        && !component.scanner_starting
        && component.error.is_none()
        && !component.flow.is_submitting()
        && component.flow.pass().is_none();
    if !wanted {
        return;
    }
    component.scanner_starting = true;
    let link = ctx.link().clone();
    let on_code = ctx.link().callback(Msg::CodeDetected);
    spawn_local(async move {
        match ScannerHandle::start(on_code).await {
            Ok(handle) => link.send_message(Msg::ScannerStarted(handle)),
            Err(err) => link.send_message(Msg::ScannerFailed(err.to_string())),
        }
    });
}

fn start_submit(component: &mut CheckInComponent, ctx: &Context<CheckInComponent>, code: String) {
    if !component.flow.begin_submit() {
        return;
    }
    component.error = None;
    // A code acquired in scan mode has already released the camera; manual
    // mode never held it. This covers any remaining path.
    component.release_scanner();
    let seq = component.seq;
    let api_base = component.api_base.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let identity = caller_identity();
        let result = api::submit_check_in(&api_base, &identity, &code).await;
        link.send_message(Msg::SubmitResolved { seq, result });
    });
}
