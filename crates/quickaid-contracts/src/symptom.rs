//! Canonical symptom identifiers and urgency tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TriageError;

/// A recognised symptom, from a fixed closed set.
///
/// Declaration order is the canonical ordering: sets of symptoms iterate in
/// this order, which makes condition ranking reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomId {
    Fever,
    Headache,
    ChestPain,
    Cough,
    AbdominalPain,
    ShortnessOfBreath,
    Nausea,
    Fatigue,
    Dizziness,
    SoreThroat,
}

impl SymptomId {
    /// Every identifier, in canonical order.
    pub const ALL: [SymptomId; 10] = [
        SymptomId::Fever,
        SymptomId::Headache,
        SymptomId::ChestPain,
        SymptomId::Cough,
        SymptomId::AbdominalPain,
        SymptomId::ShortnessOfBreath,
        SymptomId::Nausea,
        SymptomId::Fatigue,
        SymptomId::Dizziness,
        SymptomId::SoreThroat,
    ];

    /// The wire identifier, e.g. `"chest_pain"`.
    pub fn as_str(self) -> &'static str {
        match self {
            SymptomId::Fever => "fever",
            SymptomId::Headache => "headache",
            SymptomId::ChestPain => "chest_pain",
            SymptomId::Cough => "cough",
            SymptomId::AbdominalPain => "abdominal_pain",
            SymptomId::ShortnessOfBreath => "shortness_of_breath",
            SymptomId::Nausea => "nausea",
            SymptomId::Fatigue => "fatigue",
            SymptomId::Dizziness => "dizziness",
            SymptomId::SoreThroat => "sore_throat",
        }
    }
}

impl fmt::Display for SymptomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymptomId {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymptomId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| TriageError::ConfigError {
                reason: format!("unknown symptom identifier '{s}'"),
            })
    }
}

/// Ordinal severity: `Low < Medium < High`.
///
/// The derived `Ord` follows declaration order, so `max()` over a collection
/// of tiers yields the most urgent one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    #[default]
    Low,
    Medium,
    High,
}

impl UrgencyTier {
    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyTier::Low => "low",
            UrgencyTier::Medium => "medium",
            UrgencyTier::High => "high",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyTier {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(UrgencyTier::Low),
            "medium" => Ok(UrgencyTier::Medium),
            "high" => Ok(UrgencyTier::High),
            other => Err(TriageError::ConfigError {
                reason: format!("unknown urgency tier '{other}'"),
            }),
        }
    }
}
