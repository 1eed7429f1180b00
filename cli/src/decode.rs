//! Image files → `DecodedImage`.
//!
//! Only files with an accepted extension and at most `MAX_UPLOAD_BYTES` are
//! read. Decoding goes through the `image` crate and always yields RGB8.

use std::io::Cursor;
use std::path::Path;

use tracing::debug;

use quickaid_contracts::{
    error::{TriageError, TriageResult},
    image::DecodedImage,
};

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// 16 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Upper bound on declared width × height, checked before any pixel buffer
/// is allocated.
pub const MAX_PIXELS: u64 = 40_000_000;

fn invalid(reason: impl Into<String>) -> TriageError {
    TriageError::InvalidImage {
        reason: reason.into(),
    }
}

/// Reject paths whose extension is not an accepted image type.
pub fn check_extension(path: &Path) -> TriageResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(invalid(format!(
            "'{}' is not one of: {}",
            path.display(),
            ALLOWED_EXTENSIONS.join(", ")
        ))),
    }
}

/// Decode an in-memory image file.
pub fn decode_bytes(bytes: &[u8]) -> TriageResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(TriageError::EmptyInput);
    }
    if bytes.len() as u64 > MAX_UPLOAD_BYTES {
        return Err(invalid(format!(
            "image data exceeds {}MB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let (declared_w, declared_h) = image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| invalid(format!("failed to read image header: {e}")))?
        .into_dimensions()
        .map_err(|e| invalid(format!("failed to decode image: {e}")))?;
    if u64::from(declared_w) * u64::from(declared_h) > MAX_PIXELS {
        return Err(invalid(format!(
            "image dimensions {declared_w}x{declared_h} exceed the {MAX_PIXELS} pixel limit"
        )));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| invalid(format!("failed to decode image: {e}")))?;
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());
    debug!(width, height, "image decoded");
    Ok(DecodedImage::rgb(width, height, rgb.into_raw()))
}

/// Check, read and decode the image file at `path`.
pub fn load_image(path: &Path) -> TriageResult<DecodedImage> {
    check_extension(path)?;

    let size = std::fs::metadata(path)
        .map_err(|e| invalid(format!("cannot open '{}': {e}", path.display())))?
        .len();
    if size > MAX_UPLOAD_BYTES {
        return Err(invalid(format!(
            "'{}' is {size} bytes; the limit is {MAX_UPLOAD_BYTES}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| invalid(format!("cannot read '{}': {e}", path.display())))?;
    decode_bytes(&bytes)
}
