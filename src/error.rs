use thiserror::Error;

/// Every way a palette request can fail.
///
/// Messages are fixed per kind so callers can show them to users as-is.
/// The underlying decoder error stays reachable through `source()`.
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Unable to decode image")]
    Decode(#[source] image::ImageError),
    #[error("Unsupported file type: {extension:?}")]
    UnsupportedFormat { extension: String },
    #[error("No selected file")]
    MissingFilename,
    #[error("Palette size must be at least 1, got {k}")]
    InvalidArgument { k: usize },
}

pub type Result<T> = std::result::Result<T, PaletteError>;
