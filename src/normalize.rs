use image::{DynamicImage, GenericImageView, RgbImage, imageops::FilterType};

use crate::error::{PaletteError, Result};

/// Longest side an image may keep before it is scaled down for extraction.
pub const DEFAULT_MAX_DIMENSION: u32 = 500;

/// Resampling filter used when an oversized image is scaled down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "native-bin", derive(clap::ValueEnum))]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Controls how a decoded image is turned into a [`CanonicalImage`].
///
/// Downscaling bounds the cost of counting colors, at the price of blending
/// edge pixels into colors the original never contained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// `None` keeps the image at full resolution.
    pub max_dimension: Option<u32>,
    pub filter: ResizeFilter,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            filter: ResizeFilter::default(),
        }
    }
}

impl NormalizeOptions {
    /// Never resize; every source pixel is counted.
    pub fn unbounded() -> Self {
        Self {
            max_dimension: None,
            ..Self::default()
        }
    }

    pub fn with_max_dimension(mut self, max_dimension: Option<u32>) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Opaque 8-bit RGB pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalImage(RgbImage);

impl CanonicalImage {
    pub fn from_rgb_image(img: RgbImage) -> Self {
        Self(img)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.0.width() as usize * self.0.height() as usize
    }

    /// Pixels as `[r, g, b]` triples in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.0.pixels().map(|p| p.0)
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.0
    }

    pub fn into_inner(self) -> RgbImage {
        self.0
    }
}

/// Decode raw image bytes; the format is sniffed from the content.
pub fn decode(input: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(input).map_err(PaletteError::Decode)
}

/// Convert `img` to RGB, first shrinking it (aspect ratio kept) when its
/// longest side exceeds `options.max_dimension`.
pub fn normalize(img: &DynamicImage, options: &NormalizeOptions) -> CanonicalImage {
    let (w, h) = img.dimensions();

    let rgb = match options.max_dimension {
        Some(limit) if w.max(h) > limit => img
            .resize(limit, limit, options.filter.into())
            .to_rgb8(),
        _ => img.to_rgb8(),
    };

    CanonicalImage(rgb)
}

pub fn normalize_bytes(input: &[u8], options: &NormalizeOptions) -> Result<CanonicalImage> {
    let img = decode(input)?;
    Ok(normalize(&img, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn solid_rgba(w: u32, h: u32, px: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)))
    }

    #[test]
    fn small_image_keeps_its_size() {
        let img = solid_rgba(40, 30, [10, 20, 30, 255]);
        let canon = normalize(&img, &NormalizeOptions::default());
        assert_eq!((canon.width(), canon.height()), (40, 30));
        assert_eq!(canon.pixel_count(), 1200);
    }

    #[test]
    fn oversized_image_is_scaled_to_fit() {
        let img = solid_rgba(1000, 400, [0, 0, 0, 255]);
        let canon = normalize(&img, &NormalizeOptions::default());
        assert_eq!((canon.width(), canon.height()), (500, 200));
    }

    #[test]
    fn threshold_is_inclusive() {
        let img = solid_rgba(500, 120, [0, 0, 0, 255]);
        let canon = normalize(&img, &NormalizeOptions::default());
        assert_eq!((canon.width(), canon.height()), (500, 120));
    }

    #[test]
    fn unbounded_never_resizes() {
        let img = solid_rgba(800, 10, [1, 2, 3, 255]);
        let canon = normalize(&img, &NormalizeOptions::unbounded());
        assert_eq!((canon.width(), canon.height()), (800, 10));
    }

    #[test]
    fn custom_threshold_and_filter() {
        let img = solid_rgba(64, 128, [9, 9, 9, 255]);
        let opts = NormalizeOptions::default()
            .with_max_dimension(Some(32))
            .with_filter(ResizeFilter::Nearest);
        let canon = normalize(&img, &opts);
        assert_eq!((canon.width(), canon.height()), (16, 32));
        assert!(canon.pixels().all(|p| p == [9, 9, 9]));
    }

    #[test]
    fn alpha_is_dropped() {
        let img = solid_rgba(2, 2, [200, 100, 50, 0]);
        let canon = normalize(&img, &NormalizeOptions::default());
        assert!(canon.pixels().all(|p| p == [200, 100, 50]));
    }

    #[test]
    fn input_is_left_untouched() {
        let img = solid_rgba(600, 600, [5, 6, 7, 128]);
        let before = img.clone();
        let _ = normalize(&img, &NormalizeOptions::default());
        assert_eq!(img, before);
    }

    #[test]
    fn empty_image_normalizes_to_empty() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let canon = normalize(&img, &NormalizeOptions::default());
        assert_eq!(canon.pixel_count(), 0);
        assert_eq!(canon.pixels().count(), 0);
    }

    #[test]
    fn decodes_png_bytes() {
        let mut buf = Vec::new();
        solid_rgba(3, 2, [1, 2, 3, 255])
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        let canon = normalize_bytes(&buf, &NormalizeOptions::default()).unwrap();
        assert_eq!((canon.width(), canon.height()), (3, 2));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = normalize_bytes(b"\x00\x01\x02 definitely not a png", &NormalizeOptions::default())
            .unwrap_err();
        assert!(matches!(err, PaletteError::Decode(_)));
    }
}
