//! Analysis result and response types.
//!
//! These are the fixed-shape records the hosting layer serializes to JSON.
//! Field names are the stable wire contract: `detected_symptoms`,
//! `detected_conditions`, `possible_conditions`, `urgency_level`,
//! `confidence`, `recommendations`, `emergency_alert`, `safety_tips`,
//! `disclaimer`.

use serde::{Deserialize, Serialize};

use crate::symptom::UrgencyTier;

/// Which of the two analysis paths produced (or failed to produce) a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Symptoms,
    Image,
}

/// Result of analysing a free-text symptom description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    pub detected_symptoms: Vec<String>,
    /// Ranked, most-supported first.
    pub possible_conditions: Vec<String>,
    pub urgency_level: UrgencyTier,
    pub recommendations: Vec<String>,
    pub emergency_alert: EmergencyFlag,
    pub safety_tips: Vec<String>,
    pub disclaimer: String,
}

/// How sure an analysis is of its image findings.
///
/// The rule engine produces a numeric score; external services usually
/// answer with a word such as `"medium"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Score(f64),
    Level(String),
}

/// Result of analysing an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub detected_conditions: Vec<String>,
    pub confidence: Confidence,
    pub recommendations: Vec<String>,
    /// Only external services report an urgency for images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<UrgencyTier>,
    pub safety_tips: Vec<String>,
    pub disclaimer: String,
}

/// A completed analysis from either path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Symptoms(SymptomAnalysis),
    Image(ImageAnalysis),
}

/// Whether any detected item matched an emergency indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyFlag {
    pub alert: bool,
    /// The detected items that triggered the alert.
    #[serde(rename = "symptoms", default)]
    pub matched: Vec<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub action: String,
}

impl EmergencyFlag {
    pub const MESSAGE: &'static str =
        "🚨 EMERGENCY SYMPTOMS DETECTED - SEEK IMMEDIATE MEDICAL ATTENTION";
    pub const ACTION: &'static str = "Call 911 or go to nearest emergency room immediately";

    /// No alert; all other fields empty.
    pub fn clear() -> Self {
        Self::default()
    }

    /// An alert triggered by `matched`.
    pub fn raised(matched: Vec<String>) -> Self {
        Self {
            alert: true,
            matched,
            message: Self::MESSAGE.to_string(),
            action: Self::ACTION.to_string(),
        }
    }
}

/// The safe default returned whenever no usable analysis exists.
///
/// `recommendations` and `disclaimer` are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceMessage {
    pub error: String,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

/// What the boundary hands back to the caller: an analysis or guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Analysis(AnalysisResult),
    Guidance(GuidanceMessage),
}

impl AnalysisResponse {
    pub fn is_guidance(&self) -> bool {
        matches!(self, AnalysisResponse::Guidance(_))
    }
}
