//! Image feature extraction: decoded pixels → aggregate statistics.
//!
//! Only three numbers are derived: mean red intensity, mean brightness over
//! all channels, and the standard deviation of perceptual grayscale
//! luminance as a crude texture measure.

use tracing::debug;

use quickaid_contracts::{
    error::{TriageError, TriageResult},
    image::{DecodedImage, ImageFeatures},
};

/// Perceptual luminance weights for R, G, B.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

fn luminance(px: &[u8]) -> f64 {
    LUMA_WEIGHTS[0] * px[0] as f64
        + LUMA_WEIGHTS[1] * px[1] as f64
        + LUMA_WEIGHTS[2] * px[2] as f64
}

/// Compute `ImageFeatures` for a decoded RGB image.
///
/// # Errors
///
/// `TriageError::InvalidImage` when the image is not 3-channel, has zero
/// area, or its buffer length does not match `width * height * 3`.
pub fn extract_features(image: &DecodedImage) -> TriageResult<ImageFeatures> {
    if image.channels != 3 {
        return Err(TriageError::InvalidImage {
            reason: format!("expected 3 colour channels, got {}", image.channels),
        });
    }

    let count = image.pixel_count();
    if count == 0 {
        return Err(TriageError::InvalidImage {
            reason: format!("zero-area image ({}x{})", image.width, image.height),
        });
    }

    let expected = count * 3;
    if image.pixels.len() != expected {
        return Err(TriageError::InvalidImage {
            reason: format!(
                "pixel buffer holds {} bytes, expected {} for {}x{}",
                image.pixels.len(),
                expected,
                image.width,
                image.height
            ),
        });
    }

    let mut channel_sums = [0.0f64; 3];
    let mut gray_sum = 0.0f64;
    for px in image.pixels.chunks_exact(3) {
        for c in 0..3 {
            channel_sums[c] += px[c] as f64;
        }
        gray_sum += luminance(px);
    }

    let n = count as f64;
    let means = channel_sums.map(|s| s / n);
    let gray_mean = gray_sum / n;

    // Second pass over deviations keeps uniform images at exactly zero spread.
    let gray_variance = image
        .pixels
        .chunks_exact(3)
        .map(|px| {
            let d = luminance(px) - gray_mean;
            d * d
        })
        .sum::<f64>()
        / n;

    let features = ImageFeatures {
        red_intensity: means[0] / 255.0,
        average_brightness: (means[0] + means[1] + means[2]) / 3.0,
        texture_variance: gray_variance.sqrt(),
    };

    debug!(
        width = image.width,
        height = image.height,
        red_intensity = features.red_intensity,
        average_brightness = features.average_brightness,
        texture_variance = features.texture_variance,
        "image features extracted"
    );
    Ok(features)
}
