//! The deterministic fallback analysis.
//!
//! `analyze_symptoms_fallback` and `analyze_image_fallback` are pure
//! functions of their typed input. `RuleEngine` wraps them behind the
//! `Analyzer` trait with a shared knowledge base.

use std::sync::Arc;

use tracing::info;

use quickaid_contracts::{
    analysis::{Confidence, ImageAnalysis, SymptomAnalysis},
    error::{TriageError, TriageResult},
    image::DecodedImage,
};
use quickaid_core::traits::Analyzer;
use quickaid_knowledge::KnowledgeBase;

use crate::{
    combination::combine,
    emergency::detect_emergency,
    features::extract_features,
    recommend::{
        image_recommendations, image_safety_tips, symptom_recommendations, symptom_safety_tips,
    },
    text::extract_symptoms,
    visual::classify,
};

pub const FALLBACK_DISCLAIMER: &str =
    "Basic analysis only. For accurate diagnosis, consult healthcare professionals.";

/// Rule-based symptom analysis.
///
/// # Errors
///
/// - `TriageError::EmptyInput` for blank text.
/// - `TriageError::NoSymptomsRecognized` when no lexicon pattern matches.
pub fn analyze_symptoms_fallback(
    knowledge: &KnowledgeBase,
    raw_text: &str,
) -> TriageResult<SymptomAnalysis> {
    let symptoms = extract_symptoms(knowledge, raw_text)?;
    if symptoms.is_empty() {
        return Err(TriageError::NoSymptomsRecognized);
    }

    let combined = combine(knowledge, &symptoms);
    let detected: Vec<String> = symptoms.iter().map(|id| id.as_str().to_string()).collect();
    let emergency_alert = detect_emergency(knowledge.emergency_phrases(), &detected);

    Ok(SymptomAnalysis {
        detected_symptoms: detected,
        possible_conditions: combined.conditions,
        urgency_level: combined.urgency,
        recommendations: symptom_recommendations(combined.urgency),
        emergency_alert,
        safety_tips: symptom_safety_tips(),
        disclaimer: FALLBACK_DISCLAIMER.to_string(),
    })
}

/// Rule-based image analysis.
///
/// # Errors
///
/// `TriageError::InvalidImage` when the pixel buffer is unusable.
pub fn analyze_image_fallback(image: &DecodedImage) -> TriageResult<ImageAnalysis> {
    let features = extract_features(image)?;
    let assessment = classify(&features);

    Ok(ImageAnalysis {
        detected_conditions: assessment
            .conditions
            .iter()
            .map(|t| t.as_str().to_string())
            .collect(),
        confidence: Confidence::Score(assessment.confidence),
        recommendations: image_recommendations(&assessment.conditions),
        urgency: None,
        safety_tips: image_safety_tips(),
        disclaimer: FALLBACK_DISCLAIMER.to_string(),
    })
}

/// The fallback stage of the pipeline.
pub struct RuleEngine {
    knowledge: Arc<KnowledgeBase>,
}

impl RuleEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }
}

impl Analyzer for RuleEngine {
    fn name(&self) -> &str {
        "rule-engine"
    }

    fn analyze_symptoms(&self, text: &str) -> TriageResult<SymptomAnalysis> {
        let analysis = analyze_symptoms_fallback(&self.knowledge, text)?;
        info!(
            detected = analysis.detected_symptoms.len(),
            urgency = %analysis.urgency_level,
            emergency = analysis.emergency_alert.alert,
            "rule-based symptom analysis"
        );
        Ok(analysis)
    }

    fn analyze_image(&self, image: &DecodedImage) -> TriageResult<ImageAnalysis> {
        let analysis = analyze_image_fallback(image)?;
        info!(
            conditions = ?analysis.detected_conditions,
            "rule-based image analysis"
        );
        Ok(analysis)
    }
}
