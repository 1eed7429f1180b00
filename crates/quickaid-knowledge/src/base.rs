//! The loaded, validated knowledge base.
//!
//! `KnowledgeBase` is built once at start-up from a TOML document and is
//! read-only afterwards. Share it behind an `Arc`; lookups need no locking.
//!
//! Load validation:
//!
//! 1. Every lexicon and symptom key must name a canonical `SymptomId`.
//! 2. Every lexicon entry needs at least one non-blank pattern. Patterns are
//!    stored lowercased and trimmed.
//! 3. Every knowledge entry needs at least one possible condition.
//! 4. The emergency phrase list must be non-empty and contain no blanks.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use quickaid_contracts::{
    error::{TriageError, TriageResult},
    symptom::SymptomId,
};

use crate::config::{KnowledgeConfig, SymptomEntry};

/// The built-in tables shipped with quickaid.
const BUILTIN_KNOWLEDGE: &str = include_str!("../data/knowledge.toml");

/// Immutable symptom lexicon, knowledge entries, and emergency indicators.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    lexicon: BTreeMap<SymptomId, Vec<String>>,
    entries: BTreeMap<SymptomId, SymptomEntry>,
    emergency_phrases: Vec<String>,
}

impl KnowledgeBase {
    /// Parse the built-in tables.
    pub fn builtin() -> TriageResult<Self> {
        Self::from_toml_str(BUILTIN_KNOWLEDGE)
    }

    /// Parse `s` as TOML and validate it into a `KnowledgeBase`.
    ///
    /// Returns `TriageError::ConfigError` if the TOML is malformed, names an
    /// unknown symptom, or fails validation.
    pub fn from_toml_str(s: &str) -> TriageResult<Self> {
        let config: KnowledgeConfig = toml::from_str(s).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to parse knowledge TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as knowledge TOML.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to read knowledge file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate an already-deserialized configuration.
    pub fn from_config(config: KnowledgeConfig) -> TriageResult<Self> {
        let mut lexicon = BTreeMap::new();
        for (name, patterns) in config.lexicon {
            let id = SymptomId::from_str(&name)?;
            let patterns: Vec<String> = patterns
                .iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect();
            if patterns.is_empty() {
                return Err(TriageError::ConfigError {
                    reason: format!("lexicon entry '{name}' has no usable patterns"),
                });
            }
            lexicon.insert(id, patterns);
        }

        let mut entries = BTreeMap::new();
        for (name, entry) in config.symptoms {
            let id = SymptomId::from_str(&name)?;
            if entry.possible_conditions.is_empty() {
                return Err(TriageError::ConfigError {
                    reason: format!("knowledge entry '{name}' lists no possible conditions"),
                });
            }
            entries.insert(id, entry);
        }

        if config.emergency_phrases.is_empty() {
            return Err(TriageError::ConfigError {
                reason: "emergency phrase list is empty".to_string(),
            });
        }
        let mut emergency_phrases = Vec::with_capacity(config.emergency_phrases.len());
        for phrase in config.emergency_phrases {
            // Phrases are matched against space-separated text.
            let phrase = phrase.trim().to_lowercase().replace('_', " ");
            if phrase.is_empty() {
                return Err(TriageError::ConfigError {
                    reason: "emergency phrase list contains a blank entry".to_string(),
                });
            }
            emergency_phrases.push(phrase);
        }

        for id in entries.keys() {
            if !lexicon.contains_key(id) {
                debug!(symptom = %id, "knowledge entry has no lexicon patterns; it can only be reached by id");
            }
        }

        info!(
            lexicon = lexicon.len(),
            entries = entries.len(),
            emergency_phrases = emergency_phrases.len(),
            "knowledge base loaded"
        );

        Ok(Self {
            lexicon,
            entries,
            emergency_phrases,
        })
    }

    /// Lexicon entries in canonical symptom order.
    pub fn lexicon(&self) -> impl Iterator<Item = (SymptomId, &[String])> {
        self.lexicon.iter().map(|(id, p)| (*id, p.as_slice()))
    }

    /// The knowledge entry for `id`, if any.
    pub fn entry(&self, id: SymptomId) -> Option<&SymptomEntry> {
        self.entries.get(&id)
    }

    /// Lowercased, space-separated emergency-indicator phrases, in
    /// declaration order.
    pub fn emergency_phrases(&self) -> &[String] {
        &self.emergency_phrases
    }
}
