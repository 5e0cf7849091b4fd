//! Dominant-color palettes by exact pixel frequency.
//!
//! An image is decoded, normalized to opaque RGB (shrunk first when it is
//! larger than [`NormalizeOptions::max_dimension`]), and its most frequent
//! colors are returned with a hex code and a light/dark flag for picking
//! contrasting text.

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

pub mod error;
pub mod extract;
pub mod normalize;
pub mod upload;

pub use error::{PaletteError, Result};
pub use extract::{DEFAULT_PALETTE_SIZE, Palette, PaletteEntry};
pub use normalize::{CanonicalImage, NormalizeOptions, ResizeFilter};

/// Decode `input`, normalize it and extract up to `k` colors.
///
/// `k` is checked before any decoding work is done. Nothing is returned
/// unless every step succeeds.
pub fn extract_palette_bytes(input: &[u8], k: usize, options: &NormalizeOptions) -> Result<Palette> {
    extract::check_palette_size(k)?;
    let canonical = normalize::normalize_bytes(input, options)?;
    extract::extract_palette(&canonical, k)
}

/// JSON array of `{rgb, hex, is_light}` objects.
pub fn palette_to_json(palette: &[PaletteEntry]) -> serde_json::Result<String> {
    serde_json::to_string(palette)
}

/// Browser entry point.
///
/// Returns an `Array` of `{ rgb: Uint8Array, hex: string, is_light: boolean }`
/// ordered from most to least frequent. `max_dimension` defaults to 500px;
/// pass `0` to disable resizing.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    input: Vec<u8>,
    k: Option<usize>,
    max_dimension: Option<u32>,
) -> std::result::Result<Array, JsValue> {
    let options = match max_dimension {
        Some(0) => NormalizeOptions::unbounded(),
        Some(limit) => NormalizeOptions::default().with_max_dimension(Some(limit)),
        None => NormalizeOptions::default(),
    };

    let palette = extract_palette_bytes(&input, k.unwrap_or(DEFAULT_PALETTE_SIZE), &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let out = Array::new();
    for entry in &palette {
        let obj = Object::new();
        Reflect::set(&obj, &JsValue::from_str("rgb"), &Uint8Array::from(&entry.rgb[..]))?;
        Reflect::set(&obj, &JsValue::from_str("hex"), &JsValue::from_str(&entry.hex))?;
        Reflect::set(&obj, &JsValue::from_str("is_light"), &JsValue::from_bool(entry.is_light))?;
        out.push(&obj);
    }

    Ok(out)
}
