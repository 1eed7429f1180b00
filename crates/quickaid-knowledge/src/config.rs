//! On-disk schema of the knowledge tables.
//!
//! A `KnowledgeConfig` is deserialized from TOML. Symptom keys are kept as
//! plain strings here and resolved to `SymptomId` when the `KnowledgeBase`
//! is built, so an unknown key produces a readable configuration error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quickaid_contracts::symptom::UrgencyTier;

/// Everything the knowledge base knows about one canonical symptom.
///
/// Example in TOML:
/// ```toml
/// [symptoms.fever]
/// related_symptoms = ["chills", "sweating"]
/// possible_conditions = ["flu", "cold"]
/// recommendations = ["Rest and stay hydrated"]
/// urgency = "medium"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymptomEntry {
    /// Symptoms that commonly accompany this one. Free-text labels; many
    /// fall outside the canonical set.
    #[serde(default)]
    pub related_symptoms: Vec<String>,

    /// Candidate conditions, most typical first. Each one receives a vote
    /// when this symptom is detected.
    pub possible_conditions: Vec<String>,

    /// Per-symptom advice, kept for lookups.
    #[serde(default)]
    pub recommendations: Vec<String>,

    pub urgency: UrgencyTier,
}

/// The top-level structure deserialized from a knowledge TOML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Phrases whose presence in a detected item raises an emergency alert.
    pub emergency_phrases: Vec<String>,

    /// Canonical symptom name → surface-text patterns.
    pub lexicon: BTreeMap<String, Vec<String>>,

    /// Canonical symptom name → knowledge entry. Lexicon-only symptoms have
    /// no entry.
    #[serde(default)]
    pub symptoms: BTreeMap<String, SymptomEntry>,
}
