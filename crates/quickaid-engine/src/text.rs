//! Text feature extraction: free text → canonical symptoms.
//!
//! Each lexicon pattern is tested as a plain substring of the lowercased
//! text. A symptom is detected once no matter how many of its patterns hit.

use std::collections::BTreeSet;

use tracing::debug;

use quickaid_contracts::{
    error::{TriageError, TriageResult},
    symptom::SymptomId,
};
use quickaid_knowledge::KnowledgeBase;

/// Scan `text` for lexicon matches.
///
/// An empty result is not an error here; callers decide how to report
/// "nothing recognised".
///
/// # Errors
///
/// `TriageError::EmptyInput` when `text` is empty or whitespace.
pub fn extract_symptoms(
    knowledge: &KnowledgeBase,
    text: &str,
) -> TriageResult<BTreeSet<SymptomId>> {
    if text.trim().is_empty() {
        return Err(TriageError::EmptyInput);
    }

    let text = text.to_lowercase();
    let detected: BTreeSet<SymptomId> = knowledge
        .lexicon()
        .filter(|(_, patterns)| patterns.iter().any(|p| text.contains(p.as_str())))
        .map(|(id, _)| id)
        .collect();

    debug!(count = detected.len(), "symptoms extracted");
    Ok(detected)
}
