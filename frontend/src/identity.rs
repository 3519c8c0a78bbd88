//! Caller identity, supplied by the external identity provider.
//!
//! The host page sets `window.auth0_id` after login; every API request
//! attaches it. Its absence must not block the flow, so a missing or
//! non-string global resolves to an empty identity.

use js_sys::Reflect;
use wasm_bindgen::JsValue;

pub fn caller_identity() -> String {
    web_sys::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str("auth0_id")).ok())
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}
