use std::cmp::Ordering;
use std::collections::HashMap;

use palette::Srgb;
use serde::Serialize;

use crate::error::{PaletteError, Result};
use crate::normalize::CanonicalImage;

/// Number of colors returned when the caller does not ask for a size.
pub const DEFAULT_PALETTE_SIZE: usize = 10;

// BT.601 luma weights, scaled by 1000 to stay in integer arithmetic.
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;
const LIGHT_THRESHOLD: u32 = 128 * 1000;

/// A distinct color and how many pixels carry it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCount {
    pub color: [u8; 3],
    pub count: u64,
}

/// One swatch of an extracted palette.
///
/// Serializes as `{"rgb": [r, g, b], "hex": "#rrggbb", "is_light": bool}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub rgb: [u8; 3],
    pub hex: String,
    pub is_light: bool,
    /// Pixels of the (normalized) image carrying this color.
    #[serde(skip)]
    pub count: u64,
}

/// Entries ordered by descending pixel count.
pub type Palette = Vec<PaletteEntry>;

impl PaletteEntry {
    pub fn from_color(rgb: [u8; 3], count: u64) -> Self {
        Self {
            rgb,
            hex: hex_string(rgb),
            is_light: is_light(rgb),
            count,
        }
    }

    pub fn srgb(&self) -> Srgb<u8> {
        let [r, g, b] = self.rgb;
        Srgb::new(r, g, b)
    }
}

impl From<ColorCount> for PaletteEntry {
    fn from(cc: ColorCount) -> Self {
        Self::from_color(cc.color, cc.count)
    }
}

/// `#rrggbb`, lowercase and zero padded.
pub fn hex_string([r, g, b]: [u8; 3]) -> String {
    format!("#{:x}", Srgb::new(r, g, b))
}

fn luma_sum([r, g, b]: [u8; 3]) -> u32 {
    r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B
}

/// Perceived brightness on a 0-255 scale.
pub fn brightness(rgb: [u8; 3]) -> f32 {
    luma_sum(rgb) as f32 / 1000.0
}

/// True when [`brightness`] is strictly above 128.
pub fn is_light(rgb: [u8; 3]) -> bool {
    luma_sum(rgb) > LIGHT_THRESHOLD
}

/// Count every distinct color in a single pass over the pixels.
pub fn count_colors(image: &CanonicalImage) -> HashMap<[u8; 3], u64> {
    let mut counts: HashMap<[u8; 3], u64> = HashMap::new();
    for px in image.pixels() {
        *counts.entry(px).or_insert(0) += 1;
    }
    counts
}

// Most frequent first; equal counts fall back to ascending RGB so the order
// never depends on hash iteration.
fn by_rank(a: &ColorCount, b: &ColorCount) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.color.cmp(&b.color))
}

/// The `limit` highest-ranked colors, best first.
pub fn rank_colors(counts: HashMap<[u8; 3], u64>, limit: usize) -> Vec<ColorCount> {
    let mut ranked: Vec<ColorCount> = counts
        .into_iter()
        .map(|(color, count)| ColorCount { color, count })
        .collect();

    if limit == 0 {
        return Vec::new();
    }
    if ranked.len() > limit {
        ranked.select_nth_unstable_by(limit - 1, by_rank);
        ranked.truncate(limit);
    }
    ranked.sort_unstable_by(by_rank);
    ranked
}

/// Extract the `k` most frequent colors of `image`.
///
/// Returns fewer entries when the image has fewer distinct colors, and an
/// empty palette for an image without pixels.
pub fn extract_palette(image: &CanonicalImage, k: usize) -> Result<Palette> {
    check_palette_size(k)?;

    let ranked = rank_colors(count_colors(image), k);
    Ok(ranked.into_iter().map(PaletteEntry::from).collect())
}

pub(crate) fn check_palette_size(k: usize) -> Result<()> {
    if k == 0 {
        return Err(PaletteError::InvalidArgument { k });
    }
    Ok(())
}
