//! Symptom combination analyzer: detected symptoms → ranked conditions and
//! one overall urgency tier.
//!
//! Every detected symptom with a knowledge entry casts one vote for each of
//! its possible conditions. Conditions are ranked by vote count, ties keep
//! the order in which the conditions were first encountered (symptoms are
//! visited in canonical order). Urgency is the maximum tier seen.

use std::collections::BTreeSet;

use tracing::debug;

use quickaid_contracts::symptom::{SymptomId, UrgencyTier};
use quickaid_knowledge::KnowledgeBase;

/// At most this many conditions are reported.
pub const MAX_CONDITIONS: usize = 5;

/// Aggregate of a set of detected symptoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationAnalysis {
    /// Most-supported first, at most `MAX_CONDITIONS`.
    pub conditions: Vec<String>,
    pub urgency: UrgencyTier,
}

/// Combine `symptoms` using the entries in `knowledge`.
///
/// Symptoms without a knowledge entry are skipped. An input that resolves
/// to nothing yields no conditions and `UrgencyTier::Low`.
pub fn combine(knowledge: &KnowledgeBase, symptoms: &BTreeSet<SymptomId>) -> CombinationAnalysis {
    let mut votes: Vec<(&str, u32)> = Vec::new();
    let mut urgency = UrgencyTier::default();

    for entry in symptoms.iter().filter_map(|id| knowledge.entry(*id)) {
        for condition in &entry.possible_conditions {
            match votes.iter_mut().find(|(c, _)| *c == condition.as_str()) {
                Some((_, count)) => *count += 1,
                None => votes.push((condition.as_str(), 1)),
            }
        }
        urgency = urgency.max(entry.urgency);
    }

    // `sort_by` is stable, so equal counts keep first-encountered order.
    votes.sort_by(|a, b| b.1.cmp(&a.1));
    let conditions: Vec<String> = votes
        .into_iter()
        .take(MAX_CONDITIONS)
        .map(|(c, _)| c.to_string())
        .collect();

    debug!(
        symptoms = symptoms.len(),
        conditions = conditions.len(),
        urgency = %urgency,
        "symptoms combined"
    );
    CombinationAnalysis {
        conditions,
        urgency,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickaid_contracts::symptom::{SymptomId, UrgencyTier};
    use quickaid_knowledge::KnowledgeBase;

    use super::{combine, MAX_CONDITIONS};

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    fn set(ids: &[SymptomId]) -> BTreeSet<SymptomId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_fever_and_cough_rank_shared_conditions_first() {
        let a = combine(&kb(), &set(&[SymptomId::Cough, SymptomId::Fever]));
        assert_eq!(
            a.conditions,
            vec!["flu", "cold", "infection", "covid-19", "bronchitis"]
        );
        assert_eq!(a.urgency, UrgencyTier::Medium);
    }

    #[test]
    fn test_fever_and_headache_is_medium() {
        let a = combine(&kb(), &set(&[SymptomId::Fever, SymptomId::Headache]));
        assert_eq!(a.urgency, UrgencyTier::Medium);
        assert_eq!(&a.conditions[..2], &["flu".to_string(), "cold".to_string()]);
    }

    #[test]
    fn test_urgency_is_maximum_tier() {
        let a = combine(
            &kb(),
            &set(&[SymptomId::Nausea, SymptomId::Fever, SymptomId::ChestPain]),
        );
        assert_eq!(a.urgency, UrgencyTier::High);
    }

    #[test]
    fn test_conditions_truncated_to_five() {
        let all: BTreeSet<SymptomId> = SymptomId::ALL.into_iter().collect();
        let a = combine(&kb(), &all);
        assert_eq!(a.conditions.len(), MAX_CONDITIONS);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let symptoms = set(&[SymptomId::Headache, SymptomId::Nausea, SymptomId::AbdominalPain]);
        let kb = kb();
        assert_eq!(combine(&kb, &symptoms), combine(&kb, &symptoms));
    }

    #[test]
    fn test_lexicon_only_symptoms_default_to_low() {
        let a = combine(&kb(), &set(&[SymptomId::Fatigue, SymptomId::Dizziness]));
        assert!(a.conditions.is_empty());
        assert_eq!(a.urgency, UrgencyTier::Low);
    }

    #[test]
    fn test_empty_input_does_not_fail() {
        let a = combine(&kb(), &BTreeSet::new());
        assert!(a.conditions.is_empty());
        assert_eq!(a.urgency, UrgencyTier::Low);
    }
}
