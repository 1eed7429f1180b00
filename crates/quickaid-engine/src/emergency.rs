//! Emergency detector.
//!
//! An item matches when its label contains (or equals) one of the
//! emergency-indicator phrases. Items may be canonical identifiers such as
//! `chest_pain` or free-text labels reported by an external service; both
//! are compared as lowercase labels with underscores read as spaces.
//!
//! This check is independent of the urgency tier. A `high`-tier symptom
//! need not be an emergency indicator, and a match never changes urgency.

use tracing::{debug, warn};

use quickaid_contracts::analysis::EmergencyFlag;

fn normalise(item: &str) -> String {
    item.trim().to_lowercase().replace('_', " ")
}

/// Check `items` against `phrases` (lowercased, underscores already read
/// as spaces).
///
/// `matched` lists every triggering item as given, in input order.
pub fn detect_emergency<I, S>(phrases: &[String], items: I) -> EmergencyFlag
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut matched = Vec::new();
    for item in items {
        let item = item.as_ref();
        let label = normalise(item);
        if phrases.iter().any(|p| label.contains(p.as_str())) {
            matched.push(item.to_string());
        }
    }

    if matched.is_empty() {
        debug!("no emergency indicators");
        EmergencyFlag::clear()
    } else {
        warn!(matched = ?matched, "emergency indicators detected");
        EmergencyFlag::raised(matched)
    }
}
