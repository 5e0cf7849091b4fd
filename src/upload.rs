use std::path::Path;

use crate::error::{PaletteError, Result};

/// Extensions accepted for uploaded images, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Check an uploaded file name before its bytes are decoded.
///
/// Returns the extension (text after the last `.`) when it is allowed.
pub fn check_filename(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(PaletteError::MissingFilename);
    }

    let extension = match name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    };

    if ALLOWED_EXTENSIONS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        Ok(extension)
    } else {
        Err(PaletteError::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }
}

pub fn check_path(path: &Path) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    check_filename(&name).map(|_| ())
}
