//! View rendering for the check-in component.
//!
//! Three screens: the mode selection cards, the scanner pane, and the
//! manual-entry pane. Both acquisition panes show the pass card once a
//! submit succeeded. Every flag rendered here (spinners, disabled buttons,
//! banners) is derived from the one `Flow` state, never stored separately.

use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::format_valid_until;
use super::messages::Msg;
use super::scanner::SCANNER_ELEMENT_ID;
use super::state::{AcquireMode, CheckInComponent};

pub fn view(component: &CheckInComponent, ctx: &Context<CheckInComponent>) -> Html {
    let link = ctx.link();
    match component.mode {
        None => build_mode_selection(link),
        Some(AcquireMode::Scan) => build_scan_pane(component, link),
        Some(AcquireMode::Manual) => build_manual_pane(component, link),
    }
}

fn build_mode_selection(link: &Scope<CheckInComponent>) -> Html {
    html! {
        <div class="mode-grid">
            <button
                class="mode-card"
                onclick={link.callback(|_| Msg::SelectMode(AcquireMode::Scan))}
            >
                <h3>{"Scan QR Code"}</h3>
                <p>{"Use your device camera to scan a QR code"}</p>
            </button>
            <button
                class="mode-card"
                onclick={link.callback(|_| Msg::SelectMode(AcquireMode::Manual))}
            >
                <h3>{"Enter Pass Code"}</h3>
                <p>{"Manually enter a pass code to check in"}</p>
            </button>
        </div>
    }
}

fn build_scan_pane(component: &CheckInComponent, link: &Scope<CheckInComponent>) -> Html {
    let showing_pass = component.flow.pass().is_some();

    html! {
        <div class="panel scan-panel">
            { build_pane_header("Scan QR Code", link) }
            {
                if showing_pass {
                    build_pass_card(component, link)
                } else {
                    html! {
                        <div class="scanner-area">
                            {
                                if component.scanner_starting {
                                    html! { <p class="muted">{"Starting camera..."}</p> }
                                } else {
                                    html! {}
                                }
                            }
                            <div
                                id={SCANNER_ELEMENT_ID}
                                class={classes!(
                                    "scanner-viewport",
                                    component.scanner.is_none().then_some("hidden"),
                                )}
                            />
                            {
                                if component.scanner.is_some() {
                                    html! { <p class="hint">{"Point your camera at a QR code"}</p> }
                                } else {
                                    html! {}
                                }
                            }
                            {
                                if component.flow.is_submitting() {
                                    html! { <p class="muted">{"Processing..."}</p> }
                                } else {
                                    html! {}
                                }
                            }
                            { build_error_box(component.error.as_deref()) }
                            {
                                if component.error.is_some() {
                                    html! {
                                        <button
                                            class="secondary"
                                            onclick={link.callback(|_| Msg::SelectMode(AcquireMode::Scan))}
                                        >
                                            {"Try again"}
                                        </button>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>
                    }
                }
            }
        </div>
    }
}

fn build_manual_pane(component: &CheckInComponent, link: &Scope<CheckInComponent>) -> Html {
    let submit_disabled =
        component.flow.is_submitting() || component.manual_code.trim().is_empty();

    html! {
        <div class="panel manual-panel">
            { build_pane_header("Enter Pass Code", link) }
            <form onsubmit={link.callback(|e: SubmitEvent| {
                e.prevent_default();
                Msg::SubmitManual
            })}>
                <label for="pass-code">{"Pass Code"}</label>
                <input
                    type="text"
                    id="pass-code"
                    value={component.manual_code.clone()}
                    placeholder="Enter pass code"
                    oninput={link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::UpdateManualCode(input.value())
                    })}
                />
                { build_error_box(component.error.as_deref()) }
                { build_pass_card(component, link) }
                <button type="submit" disabled={submit_disabled}>
                    { if component.flow.is_submitting() { "Processing..." } else { "Check In" } }
                </button>
            </form>
        </div>
    }
}

fn build_pane_header(title: &str, link: &Scope<CheckInComponent>) -> Html {
    html! {
        <div class="pane-header">
            <h3>{title}</h3>
            <button class="back-link" onclick={link.callback(|_| Msg::Back)}>
                {"\u{2190} Back"}
            </button>
        </div>
    }
}

/// The pass display shown after a successful submit, in either mode.
fn build_pass_card(component: &CheckInComponent, link: &Scope<CheckInComponent>) -> Html {
    let Some(pass) = component.flow.pass() else {
        return html! {};
    };

    html! {
        <div class="pass-card">
            <h3 class="gym-name">
                { pass.gym_name.clone().unwrap_or_else(|| "Gym".to_string()) }
            </h3>
            {
                match &pass.valid_until {
                    Some(until) => html! {
                        <p class="valid-until">
                            { format!("Valid until {}", format_valid_until(until)) }
                        </p>
                    },
                    None => html! {},
                }
            }
            <div class="pass-code-block">
                <p class="label">{"Pass Code"}</p>
                <p class="code">
                    { if pass.has_pass_code() { pass.pass_code().to_string() } else { "N/A".to_string() } }
                </p>
            </div>
            {
                match &pass.qr_image {
                    Some(src) => html! {
                        <div class="qr-image">
                            <img src={src.clone()} alt="QR Code" />
                        </div>
                    },
                    None => html! {},
                }
            }
            {
                if component.flow.is_completed() {
                    html! {
                        <div class="banner success">
                            {"Check-in completed successfully!"}
                        </div>
                    }
                } else {
                    html! {
                        <button
                            class="complete-btn"
                            disabled={component.flow.is_completing()}
                            onclick={link.callback(|_| Msg::Complete)}
                        >
                            { if component.flow.is_completing() { "Processing..." } else { "Check In" } }
                        </button>
                    }
                }
            }
            { build_error_box(component.flow.completion_error()) }
        </div>
    }
}

fn build_error_box(message: Option<&str>) -> Html {
    match message {
        Some(text) => html! {
            <div class="banner error">
                <p>{text}</p>
            </div>
        },
        None => html! {},
    }
}
