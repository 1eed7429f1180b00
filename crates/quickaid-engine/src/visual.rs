//! Visual condition classifier: `ImageFeatures` → condition tags + confidence.
//!
//! Rules fire independently and their confidence increments add up, clamped
//! to 1.0. Tags come out in rule-declaration order. When nothing fires the
//! result is `general_skin_assessment` at 0.1.

use tracing::debug;

use quickaid_contracts::image::{ConditionTag, ImageFeatures};

/// Confidence reported when no rule fires.
pub const BASELINE_CONFIDENCE: f64 = 0.1;

/// Output of the visual classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualAssessment {
    /// Tags in rule-declaration order, never empty.
    pub conditions: Vec<ConditionTag>,
    /// In `[0, 1]`.
    pub confidence: f64,
}

struct VisualRule {
    tag: ConditionTag,
    increment: f64,
    fires: fn(&ImageFeatures) -> bool,
}

const RULES: [VisualRule; 3] = [
    VisualRule {
        tag: ConditionTag::PossibleInflammationOrInjury,
        increment: 0.3,
        fires: |f| f.red_intensity > 0.6,
    },
    VisualRule {
        tag: ConditionTag::PossibleBruising,
        increment: 0.2,
        fires: |f| f.average_brightness < 100.0,
    },
    VisualRule {
        tag: ConditionTag::TexturalChanges,
        increment: 0.2,
        fires: |f| f.texture_variance / 255.0 > 0.1,
    },
];

/// Apply the visual rules to `features`.
pub fn classify(features: &ImageFeatures) -> VisualAssessment {
    let mut conditions = Vec::new();
    let mut confidence = 0.0;

    for rule in RULES.iter().filter(|r| (r.fires)(features)) {
        conditions.push(rule.tag);
        confidence += rule.increment;
    }

    if conditions.is_empty() {
        conditions.push(ConditionTag::GeneralSkinAssessment);
        confidence = BASELINE_CONFIDENCE;
    }

    let assessment = VisualAssessment {
        conditions,
        confidence: f64::min(confidence, 1.0),
    };
    debug!(
        tags = ?assessment.conditions,
        confidence = assessment.confidence,
        "visual classification"
    );
    assessment
}
