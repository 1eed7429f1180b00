//! # quickaid-engine
//!
//! The deterministic, rule-based analysis core of quickaid.
//!
//! ## Stages
//!
//! ```text
//! symptom text → text::extract_symptoms → combination::combine ─┬→ recommend
//!                                        emergency::detect ─────┘
//! decoded image → features::extract_features → visual::classify → recommend
//! ```
//!
//! [`rules::RuleEngine`] packages both paths as the fallback
//! [`quickaid_core::traits::Analyzer`]. [`external::ExternalAnalyzer`]
//! normalises replies from an external analysis service for the same trait.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quickaid_core::Pipeline;
//! use quickaid_engine::RuleEngine;
//! use quickaid_knowledge::KnowledgeBase;
//! use quickaid_verify::{response_schemas, standard_verifier};
//!
//! let knowledge = Arc::new(KnowledgeBase::builtin()?);
//! let pipeline = Pipeline::new(
//!     Box::new(RuleEngine::new(knowledge)),
//!     Box::new(standard_verifier()),
//!     response_schemas(),
//! );
//! let response = pipeline.respond_symptoms("fever and a bad cough");
//! ```

pub mod combination;
pub mod emergency;
pub mod external;
pub mod features;
pub mod recommend;
pub mod rules;
pub mod text;
pub mod visual;

pub use external::{ExternalAnalyzer, RecordedReply, ReplySource};
pub use rules::{analyze_image_fallback, analyze_symptoms_fallback, RuleEngine};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quickaid_contracts::{
        analysis::{AnalysisResponse, AnalysisResult, Confidence},
        error::TriageError,
        image::DecodedImage,
        symptom::UrgencyTier,
    };
    use quickaid_core::Pipeline;
    use quickaid_knowledge::KnowledgeBase;
    use quickaid_verify::{response_schemas, standard_verifier};

    use crate::{
        analyze_image_fallback, analyze_symptoms_fallback,
        external::EXTERNAL_DISCLAIMER,
        recommend::EMERGENCY_INSTRUCTION,
        rules::FALLBACK_DISCLAIMER,
        ExternalAnalyzer, RecordedReply, RuleEngine,
    };

    fn kb() -> Arc<KnowledgeBase> {
        Arc::new(KnowledgeBase::builtin().unwrap())
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(
            Box::new(RuleEngine::new(kb())),
            Box::new(standard_verifier()),
            response_schemas(),
        )
    }

    fn pipeline_with_reply(reply: &str) -> Pipeline {
        pipeline().with_external(Box::new(ExternalAnalyzer::new(RecordedReply::new(reply), kb())))
    }

    // ── 1. symptom scenarios ──────────────────────────────────────────────────

    #[test]
    fn test_fever_and_headache_scenario() {
        let a = analyze_symptoms_fallback(&kb(), "I have a fever and a headache").unwrap();

        assert_eq!(a.detected_symptoms, vec!["fever", "headache"]);
        assert_eq!(a.urgency_level, UrgencyTier::Medium);
        assert_eq!(&a.possible_conditions[..2], &["flu".to_string(), "cold".to_string()]);
        assert!(!a.emergency_alert.alert);
        assert_eq!(a.recommendations[0], "Contact your healthcare provider within 24 hours");
        assert_eq!(a.disclaimer, FALLBACK_DISCLAIMER);
        assert!(!a.safety_tips.is_empty());
    }

    #[test]
    fn test_chest_pain_is_high_with_alert() {
        let a = analyze_symptoms_fallback(&kb(), "Crushing chest pain and I feel dizzy").unwrap();

        assert_eq!(a.urgency_level, UrgencyTier::High);
        assert_eq!(a.recommendations[0], EMERGENCY_INSTRUCTION);
        assert!(a.emergency_alert.alert);
        assert_eq!(a.emergency_alert.matched, vec!["chest_pain"]);
    }

    #[test]
    fn test_lexicon_only_text_is_low_with_no_conditions() {
        let a = analyze_symptoms_fallback(&kb(), "exhausted and lightheaded").unwrap();
        assert_eq!(a.detected_symptoms, vec!["fatigue", "dizziness"]);
        assert!(a.possible_conditions.is_empty());
        assert_eq!(a.urgency_level, UrgencyTier::Low);
    }

    #[test]
    fn test_unrecognised_text_is_an_error() {
        match analyze_symptoms_fallback(&kb(), "my elbow itches") {
            Err(TriageError::NoSymptomsRecognized) => {}
            other => panic!("expected NoSymptomsRecognized, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_text_is_an_error() {
        match analyze_symptoms_fallback(&kb(), "") {
            Err(TriageError::EmptyInput) => {}
            other => panic!("expected EmptyInput, got {:?}", other),
        }
    }

    // ── 2. image scenarios ────────────────────────────────────────────────────

    #[test]
    fn test_pure_red_image_scenario() {
        let a = analyze_image_fallback(&DecodedImage::uniform(4, 4, [255, 0, 0])).unwrap();

        // Mean brightness of pure red is 85, so bruising fires too.
        assert_eq!(
            a.detected_conditions,
            vec!["possible_inflammation_or_injury", "possible_bruising"]
        );
        match a.confidence {
            Confidence::Score(c) => assert!(c >= 0.3, "confidence {c}"),
            other => panic!("expected a numeric score, got {:?}", other),
        }
        assert_eq!(a.urgency, None);
        assert_eq!(a.recommendations.len(), 12);
    }

    #[test]
    fn test_black_image_scenario() {
        let a = analyze_image_fallback(&DecodedImage::uniform(2, 2, [0, 0, 0])).unwrap();
        assert_eq!(a.detected_conditions, vec!["possible_bruising"]);
    }

    #[test]
    fn test_plain_grey_image_gets_general_assessment() {
        let a = analyze_image_fallback(&DecodedImage::uniform(2, 2, [120, 120, 120])).unwrap();
        assert_eq!(a.detected_conditions, vec!["general_skin_assessment"]);
        assert_eq!(a.confidence, Confidence::Score(0.1));
        assert_eq!(a.recommendations.len(), 4);
    }

    #[test]
    fn test_empty_pixel_buffer_is_invalid() {
        match analyze_image_fallback(&DecodedImage::rgb(1, 1, vec![])) {
            Err(TriageError::InvalidImage { .. }) => {}
            other => panic!("expected InvalidImage, got {:?}", other),
        }
    }

    // ── 3. pipeline ───────────────────────────────────────────────────────────

    #[test]
    fn test_rule_engine_results_pass_verification() {
        let p = pipeline();

        let symptoms = p.respond_symptoms("fever, cough and shortness of breath");
        assert!(!symptoms.is_guidance(), "got {:?}", symptoms);

        for color in [[255, 0, 0], [0, 0, 0], [120, 120, 120]] {
            let image = p.respond_image(&DecodedImage::uniform(3, 3, color));
            assert!(!image.is_guidance(), "got {:?}", image);
        }
    }

    #[test]
    fn test_unrecognised_text_degrades_to_guidance() {
        match pipeline().respond_symptoms("everything is fine") {
            AnalysisResponse::Guidance(g) => {
                assert_eq!(g.error, "No recognizable symptoms found");
                assert!(!g.recommendations.is_empty());
                assert!(!g.disclaimer.is_empty());
            }
            other => panic!("expected guidance, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_external_reply_is_used() {
        let p = pipeline_with_reply(
            r#"Analysis: {"detected_symptoms": ["fever"], "possible_conditions": ["flu"],
                "urgency_level": "medium", "recommendations": ["Rest"]}"#,
        );
        match p.respond_symptoms("fever") {
            AnalysisResponse::Analysis(AnalysisResult::Symptoms(a)) => {
                assert_eq!(a.disclaimer, EXTERNAL_DISCLAIMER);
                assert_eq!(a.recommendations, vec!["Rest"]);
            }
            other => panic!("expected external symptom analysis, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_external_reply_falls_back() {
        let p = pipeline_with_reply("Sorry, I can't analyse that.");
        match p.respond_symptoms("fever") {
            AnalysisResponse::Analysis(AnalysisResult::Symptoms(a)) => {
                assert_eq!(a.disclaimer, FALLBACK_DISCLAIMER);
            }
            other => panic!("expected fallback symptom analysis, got {:?}", other),
        }
    }

    #[test]
    fn test_external_reply_failing_verification_falls_back() {
        // Parses fine but carries no recommendations.
        let p = pipeline_with_reply(r#"{"detected_conditions": ["rash"], "confidence": 0.9}"#);
        match p.respond_image(&DecodedImage::uniform(2, 2, [0, 0, 0])) {
            AnalysisResponse::Analysis(AnalysisResult::Image(a)) => {
                assert_eq!(a.disclaimer, FALLBACK_DISCLAIMER);
                assert_eq!(a.detected_conditions, vec!["possible_bruising"]);
            }
            other => panic!("expected fallback image analysis, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_symptom_result_uses_wire_keys() {
        let a = analyze_symptoms_fallback(&kb(), "chest pain").unwrap();
        let v = serde_json::to_value(&a).unwrap();

        for key in [
            "detected_symptoms",
            "possible_conditions",
            "urgency_level",
            "recommendations",
            "emergency_alert",
            "safety_tips",
            "disclaimer",
        ] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(v["urgency_level"], "high");
        assert_eq!(v["emergency_alert"]["symptoms"][0], "chest_pain");
    }
}
