//! # quickaid-knowledge
//!
//! The static tables behind quickaid's rule engine, loaded from TOML.
//!
//! ## Overview
//!
//! [`KnowledgeBase`] holds three read-only tables:
//!
//! - the **symptom lexicon**: canonical symptom → surface-text patterns
//! - the **knowledge entries**: canonical symptom → related symptoms,
//!   candidate conditions, advice, and urgency tier
//! - the **emergency indicators**: phrases that raise an immediate-care alert
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quickaid_knowledge::KnowledgeBase;
//!
//! let knowledge = Arc::new(KnowledgeBase::builtin()?);
//! // or: KnowledgeBase::from_file(Path::new("knowledge.toml"))?
//! ```

pub mod base;
pub mod config;

pub use base::KnowledgeBase;
pub use config::{KnowledgeConfig, SymptomEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use quickaid_contracts::{
        error::TriageError,
        symptom::{SymptomId, UrgencyTier},
    };

    use crate::KnowledgeBase;

    fn urgency(kb: &KnowledgeBase, id: SymptomId) -> Option<UrgencyTier> {
        kb.entry(id).map(|e| e.urgency)
    }

    fn patterns(kb: &KnowledgeBase, id: SymptomId) -> Option<Vec<String>> {
        kb.lexicon()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, p)| p.to_vec())
    }

    fn expect_config_error(toml: &str, needle: &str) {
        match KnowledgeBase::from_toml_str(toml) {
            Err(TriageError::ConfigError { reason }) => {
                assert!(
                    reason.contains(needle),
                    "expected '{needle}' in reason, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 1. built-in tables ────────────────────────────────────────────────────

    #[test]
    fn test_builtin_tables_load() {
        let kb = KnowledgeBase::builtin().unwrap();

        assert_eq!(kb.lexicon().count(), 10, "all ten canonical symptoms have patterns");
        assert_eq!(urgency(&kb, SymptomId::Fever), Some(UrgencyTier::Medium));
        assert_eq!(urgency(&kb, SymptomId::Headache), Some(UrgencyTier::Low));
        assert_eq!(urgency(&kb, SymptomId::ChestPain), Some(UrgencyTier::High));
        assert_eq!(urgency(&kb, SymptomId::ShortnessOfBreath), Some(UrgencyTier::High));
        assert!(kb.emergency_phrases().iter().any(|p| p == "chest pain"));
    }

    #[test]
    fn test_lexicon_only_symptoms_have_no_entry() {
        let kb = KnowledgeBase::builtin().unwrap();

        for id in [SymptomId::Fatigue, SymptomId::Dizziness, SymptomId::SoreThroat] {
            assert!(patterns(&kb, id).is_some(), "{id} should have patterns");
            assert!(kb.entry(id).is_none(), "{id} should have no knowledge entry");
        }
    }

    #[test]
    fn test_entry_exposes_related_symptoms_and_advice() {
        let kb = KnowledgeBase::builtin().unwrap();
        let fever = kb.entry(SymptomId::Fever).unwrap();

        assert_eq!(
            fever.possible_conditions,
            vec!["flu", "cold", "infection", "covid-19"]
        );
        assert!(fever.related_symptoms.iter().any(|s| s == "chills"));
        assert_eq!(fever.recommendations[0], "Rest and stay hydrated");
    }

    #[test]
    fn test_lexicon_iterates_in_canonical_order() {
        let kb = KnowledgeBase::builtin().unwrap();
        let ids: Vec<SymptomId> = kb.lexicon().map(|(id, _)| id).collect();
        assert_eq!(ids, SymptomId::ALL.to_vec());
    }

    // ── 2. normalisation ──────────────────────────────────────────────────────

    #[test]
    fn test_patterns_and_phrases_are_lowercased() {
        let toml = r#"
            emergency_phrases = ["  Chest Pain "]

            [lexicon]
            cough = ["Coughing", "  HACKING"]
        "#;

        let kb = KnowledgeBase::from_toml_str(toml).unwrap();
        assert_eq!(
            patterns(&kb, SymptomId::Cough).unwrap(),
            vec!["coughing".to_string(), "hacking".to_string()]
        );
        assert_eq!(kb.emergency_phrases(), &["chest pain".to_string()]);
    }

    #[test]
    fn test_identifier_style_phrase_is_normalised() {
        let toml = r#"
            emergency_phrases = ["Chest_Pain", "shortness_of_breath"]

            [lexicon]
            cough = ["cough"]
        "#;

        let kb = KnowledgeBase::from_toml_str(toml).unwrap();
        assert_eq!(
            kb.emergency_phrases(),
            &["chest pain".to_string(), "shortness of breath".to_string()]
        );
    }

    // ── 3. validation failures ────────────────────────────────────────────────

    #[test]
    fn test_unknown_symptom_rejected() {
        let toml = r#"
            emergency_phrases = ["chest pain"]

            [lexicon]
            hiccups = ["hic"]
        "#;
        expect_config_error(toml, "hiccups");
    }

    #[test]
    fn test_blank_patterns_rejected() {
        let toml = r#"
            emergency_phrases = ["chest pain"]

            [lexicon]
            fever = ["   "]
        "#;
        expect_config_error(toml, "no usable patterns");
    }

    #[test]
    fn test_entry_without_conditions_rejected() {
        let toml = r#"
            emergency_phrases = ["chest pain"]

            [lexicon]
            fever = ["fever"]

            [symptoms.fever]
            possible_conditions = []
            urgency = "medium"
        "#;
        expect_config_error(toml, "no possible conditions");
    }

    #[test]
    fn test_empty_emergency_list_rejected() {
        let toml = r#"
            emergency_phrases = []

            [lexicon]
            fever = ["fever"]
        "#;
        expect_config_error(toml, "emergency phrase list is empty");
    }

    #[test]
    fn test_unknown_urgency_rejected() {
        let toml = r#"
            emergency_phrases = ["chest pain"]

            [lexicon]
            fever = ["fever"]

            [symptoms.fever]
            possible_conditions = ["flu"]
            urgency = "critical"
        "#;
        expect_config_error(toml, "failed to parse knowledge TOML");
    }

    #[test]
    fn test_toml_parse_error() {
        expect_config_error("this is not valid toml ][[[", "failed to parse knowledge TOML");
    }

    #[test]
    fn test_missing_file() {
        let path = std::path::Path::new("/definitely/not/here/knowledge.toml");
        match KnowledgeBase::from_file(path) {
            Err(TriageError::ConfigError { reason }) => {
                assert!(reason.contains("failed to read knowledge file"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
