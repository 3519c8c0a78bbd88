//! Small display helpers for the check-in view.

use js_sys::Date;
use wasm_bindgen::JsValue;

/// Formats a server expiry string for the browser locale.
///
/// The value is kept raw in the pass record; only the rendering goes
/// through the JS `Date` machinery, which tolerates every format the API is
/// known to send.
pub fn format_valid_until(raw: &str) -> String {
    let date = Date::new(&JsValue::from_str(raw));
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}
