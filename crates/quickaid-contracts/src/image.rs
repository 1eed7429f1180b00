//! Image input and visual feature types.
//!
//! quickaid never decodes file formats in its core. The hosting layer hands
//! over an already-decoded 8-bit pixel buffer; everything downstream works on
//! aggregate statistics derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A decoded, interleaved 8-bit pixel buffer.
///
/// The extractor only accepts `channels == 3` (RGB) with exactly
/// `width * height * 3` bytes of pixel data. Nothing is validated on
/// construction so that a caller can hand over whatever the decoder produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wrap an interleaved RGB8 buffer.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels: 3,
            pixels,
        }
    }

    /// An image where every pixel is `color`.
    pub fn uniform(width: u32, height: u32, color: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self::rgb(width, height, pixels)
    }

    /// Number of pixels implied by the declared dimensions.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Aggregate colour and texture statistics of one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFeatures {
    /// Mean of the red channel, scaled to `[0, 1]`.
    pub red_intensity: f64,
    /// Mean over all three channel means, in `[0, 255]`.
    pub average_brightness: f64,
    /// Population standard deviation of perceptual grayscale luminance.
    pub texture_variance: f64,
}

/// A visually inferred condition label.
///
/// Declaration order is the rule order of the classifier and therefore the
/// order tags appear in its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTag {
    PossibleInflammationOrInjury,
    PossibleBruising,
    TexturalChanges,
    GeneralSkinAssessment,
}

impl ConditionTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionTag::PossibleInflammationOrInjury => "possible_inflammation_or_injury",
            ConditionTag::PossibleBruising => "possible_bruising",
            ConditionTag::TexturalChanges => "textural_changes",
            ConditionTag::GeneralSkinAssessment => "general_skin_assessment",
        }
    }
}

impl fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
