//! Local QR image generation for passes the server returned without one.
//!
//! Encodes the resolved pass code into an SVG and wraps it in a base64
//! `data:` URI so the pass card can show it in a plain `<img>`. Failure here
//! is non-fatal: the textual code is still usable, so callers log and move
//! on.

use base64::{engine::general_purpose, Engine as _};
use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::QrCode;

const QR_SIZE_PX: u32 = 200;

pub fn pass_code_data_url(code: &str) -> Result<String, QrError> {
    let qr = QrCode::new(code.as_bytes())?;
    let image = qr
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE_PX, QR_SIZE_PX)
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        general_purpose::STANDARD.encode(image)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_code_into_svg_data_url() {
        let url = pass_code_data_url("XYZ123").unwrap();
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg =
            String::from_utf8(general_purpose::STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
    }
}
