//! Scoped camera scanner resource.
//!
//! Binds the page-global `Html5Qrcode` class (the html5-qrcode bundle is
//! loaded from `index.html`) as a capability: open the rear camera at a
//! target frame rate with a detection box, deliver decoded codes, stop.
//! Frame decoding itself is never reimplemented here.
//!
//! `ScannerHandle` is the exclusive owner of the running stream. It emits at
//! most one code: a guard flag is set synchronously on the first detection,
//! so frames still in flight cannot trigger a second submission. `release`
//! is the single stop path used by every exit route: back action, mode
//! switch, first detection, and component teardown.

use std::cell::Cell;
use std::rc::Rc;

use common::error::CheckInError;
use gloo_console::error;
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use yew::platform::spawn_local;
use yew::Callback;

/// DOM id of the viewport element the scanner renders into.
pub const SCANNER_ELEMENT_ID: &str = "qr-reader";

const TARGET_FPS: f64 = 10.0;
const DETECTION_BOX_PX: f64 = 250.0;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Html5Qrcode)]
    type JsScanner;

    #[wasm_bindgen(constructor, js_class = "Html5Qrcode")]
    fn new(element_id: &str) -> JsScanner;

    #[wasm_bindgen(method, catch, js_class = "Html5Qrcode")]
    async fn start(
        this: &JsScanner,
        camera: &JsValue,
        config: &JsValue,
        on_decode: &Function,
        on_frame_failure: &Function,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_class = "Html5Qrcode")]
    fn stop(this: &JsScanner) -> Promise;

    #[wasm_bindgen(method, js_class = "Html5Qrcode")]
    fn clear(this: &JsScanner);
}

pub struct ScannerHandle {
    inner: JsScanner,
    // Kept alive for as long as the JS side may still invoke them.
    _on_decode: Closure<dyn FnMut(String, JsValue)>,
    _on_frame_failure: Closure<dyn FnMut(JsValue)>,
}

impl ScannerHandle {
    /// Opens the rear camera and starts the decode loop.
    ///
    /// `on_code` fires at most once, with the first decoded text. Stream
    /// acquisition failure (permission denied, no camera) is the only error
    /// surfaced; per-frame decode misses are expected noise and dropped.
    pub async fn start(on_code: Callback<String>) -> Result<ScannerHandle, CheckInError> {
        let inner = JsScanner::new(SCANNER_ELEMENT_ID);

        let fired = Rc::new(Cell::new(false));
        let on_decode = Closure::wrap(Box::new(move |code: String, _details: JsValue| {
            if fired.replace(true) {
                return;
            }
            // The handler for this emission releases the scanner before the
            // submission request is issued.
            on_code.emit(code);
        }) as Box<dyn FnMut(String, JsValue)>);
        let on_frame_failure =
            Closure::wrap(Box::new(move |_reason: JsValue| {}) as Box<dyn FnMut(JsValue)>);

        let camera = Object::new();
        set(&camera, "facingMode", &JsValue::from_str("environment"));
        let detection_box = Object::new();
        set(&detection_box, "width", &JsValue::from_f64(DETECTION_BOX_PX));
        set(
            &detection_box,
            "height",
            &JsValue::from_f64(DETECTION_BOX_PX),
        );
        let config = Object::new();
        set(&config, "fps", &JsValue::from_f64(TARGET_FPS));
        set(&config, "qrbox", &detection_box);

        inner
            .start(
                &camera,
                &config,
                on_decode.as_ref().unchecked_ref(),
                on_frame_failure.as_ref().unchecked_ref(),
            )
            .await
            .map_err(|reason| {
                error!("Error starting QR scanner:", reason);
                CheckInError::Capture(
                    "Failed to start camera. Please check permissions.".to_string(),
                )
            })?;

        Ok(ScannerHandle {
            inner,
            _on_decode: on_decode,
            _on_frame_failure: on_frame_failure,
        })
    }

    /// Stops the stream and frees the camera.
    ///
    /// The handle (and its callbacks) is dropped only after the stream has
    /// actually stopped, so no frame can land on a dead closure.
    pub fn release(self) {
        spawn_local(async move {
            if let Err(reason) = JsFuture::from(self.inner.stop()).await {
                error!("Error stopping QR scanner:", reason);
            }
            self.inner.clear();
        });
    }
}

fn set(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}
