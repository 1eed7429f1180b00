//! Adapter for an external analysis service.
//!
//! The service itself is reached through a `ReplySource`, which returns the
//! raw text the service answered with. `ExternalAnalyzer` turns that text
//! into the fixed result types:
//!
//! 1. Take the span from the first `{` to the last `}` and parse it as JSON.
//! 2. Read each known key, stringifying list items and filling defaults for
//!    missing keys (urgency `medium`, confidence `medium`, fixed safety tips).
//! 3. Raise the emergency flag if the service said so, or if any reported
//!    symptom label matches an emergency indicator.
//!
//! Anything that cannot be read this way is `MalformedExternalResponse`.
//! The pipeline treats that like any other failure and falls back.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use quickaid_contracts::{
    analysis::{Confidence, EmergencyFlag, ImageAnalysis, SymptomAnalysis},
    error::{TriageError, TriageResult},
    image::DecodedImage,
    symptom::UrgencyTier,
};
use quickaid_core::traits::Analyzer;
use quickaid_knowledge::KnowledgeBase;

use crate::{
    emergency::detect_emergency,
    recommend::{image_safety_tips, symptom_safety_tips},
};

pub const EXTERNAL_DISCLAIMER: &str =
    "AI analysis for educational purposes only. Always consult healthcare professionals.";

/// Where raw external replies come from.
///
/// Errors from a source should be `TriageError::ExternalUnavailable`.
pub trait ReplySource: Send + Sync {
    fn name(&self) -> &str;

    fn symptom_reply(&self, text: &str) -> TriageResult<String>;

    fn image_reply(&self, image: &DecodedImage) -> TriageResult<String>;
}

/// A reply captured earlier, returned verbatim for every request.
#[derive(Debug, Clone)]
pub struct RecordedReply {
    reply: String,
}

impl RecordedReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl ReplySource for RecordedReply {
    fn name(&self) -> &str {
        "recorded-reply"
    }

    fn symptom_reply(&self, _text: &str) -> TriageResult<String> {
        Ok(self.reply.clone())
    }

    fn image_reply(&self, _image: &DecodedImage) -> TriageResult<String> {
        Ok(self.reply.clone())
    }
}

/// `Analyzer` over a `ReplySource`.
pub struct ExternalAnalyzer<S> {
    source: S,
    knowledge: Arc<KnowledgeBase>,
}

impl<S: ReplySource> ExternalAnalyzer<S> {
    pub fn new(source: S, knowledge: Arc<KnowledgeBase>) -> Self {
        Self { source, knowledge }
    }
}

impl<S: ReplySource> Analyzer for ExternalAnalyzer<S> {
    fn name(&self) -> &str {
        self.source.name()
    }

    fn analyze_symptoms(&self, text: &str) -> TriageResult<SymptomAnalysis> {
        let reply = self.source.symptom_reply(text)?;
        parse_symptom_reply(&self.knowledge, &reply)
    }

    fn analyze_image(&self, image: &DecodedImage) -> TriageResult<ImageAnalysis> {
        let reply = self.source.image_reply(image)?;
        parse_image_reply(&reply)
    }
}

// ── Reply normalisation ──────────────────────────────────────────────────────

fn malformed(reason: impl Into<String>) -> TriageError {
    TriageError::MalformedExternalResponse {
        reason: reason.into(),
    }
}

/// The outermost `{…}` span of `reply`.
pub fn extract_json_object(reply: &str) -> TriageResult<&str> {
    match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&reply[start..=end]),
        _ => Err(malformed("reply contains no JSON object")),
    }
}

fn parse_object(reply: &str) -> TriageResult<Map<String, Value>> {
    let json = extract_json_object(reply)?;
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(malformed("reply JSON is not an object")),
        Err(e) => Err(malformed(format!("reply JSON is invalid: {e}"))),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_list(
    obj: &Map<String, Value>,
    key: &str,
    default: impl FnOnce() -> Vec<String>,
) -> TriageResult<Vec<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(default()),
        Some(Value::Array(items)) => Ok(items.iter().map(stringify).collect()),
        Some(_) => Err(malformed(format!("'{key}' is not a list"))),
    }
}

fn urgency(obj: &Map<String, Value>, key: &str) -> TriageResult<UrgencyTier> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(UrgencyTier::Medium),
        Some(Value::String(s)) => UrgencyTier::from_str(s)
            .map_err(|_| malformed(format!("'{key}' has unknown value '{s}'"))),
        Some(_) => Err(malformed(format!("'{key}' is not a string"))),
    }
}

/// The service's own emergency verdict: a bare bool or `{ "alert": bool }`.
fn reported_alert(obj: &Map<String, Value>) -> bool {
    match obj.get("emergency_alert") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Object(flag)) => flag.get("alert").and_then(Value::as_bool).unwrap_or(false),
        _ => false,
    }
}

fn confidence(obj: &Map<String, Value>) -> TriageResult<Confidence> {
    match obj.get("confidence") {
        None | Some(Value::Null) => Ok(Confidence::Level("medium".to_string())),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Confidence::Score)
            .ok_or_else(|| malformed("'confidence' is not a finite number")),
        Some(Value::String(s)) => Ok(Confidence::Level(s.clone())),
        Some(_) => Err(malformed("'confidence' is neither a number nor a string")),
    }
}

/// Normalise a symptom-analysis reply.
pub fn parse_symptom_reply(knowledge: &KnowledgeBase, reply: &str) -> TriageResult<SymptomAnalysis> {
    let obj = parse_object(reply)?;

    let detected_symptoms = string_list(&obj, "detected_symptoms", Vec::new)?;
    let detected = detect_emergency(knowledge.emergency_phrases(), &detected_symptoms);
    let emergency_alert = if detected.alert {
        detected
    } else if reported_alert(&obj) {
        EmergencyFlag::raised(Vec::new())
    } else {
        EmergencyFlag::clear()
    };

    let analysis = SymptomAnalysis {
        detected_symptoms,
        possible_conditions: string_list(&obj, "possible_conditions", Vec::new)?,
        urgency_level: urgency(&obj, "urgency_level")?,
        recommendations: string_list(&obj, "recommendations", Vec::new)?,
        emergency_alert,
        safety_tips: string_list(&obj, "safety_tips", symptom_safety_tips)?,
        disclaimer: EXTERNAL_DISCLAIMER.to_string(),
    };
    debug!(
        detected = analysis.detected_symptoms.len(),
        urgency = %analysis.urgency_level,
        "external symptom reply normalised"
    );
    Ok(analysis)
}

/// Normalise an image-analysis reply.
pub fn parse_image_reply(reply: &str) -> TriageResult<ImageAnalysis> {
    let obj = parse_object(reply)?;

    let analysis = ImageAnalysis {
        detected_conditions: string_list(&obj, "detected_conditions", Vec::new)?,
        confidence: confidence(&obj)?,
        recommendations: string_list(&obj, "recommendations", Vec::new)?,
        urgency: Some(urgency(&obj, "urgency")?),
        safety_tips: string_list(&obj, "safety_tips", image_safety_tips)?,
        disclaimer: EXTERNAL_DISCLAIMER.to_string(),
    };
    debug!(
        conditions = analysis.detected_conditions.len(),
        "external image reply normalised"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quickaid_contracts::{
        analysis::Confidence,
        error::TriageError,
        image::DecodedImage,
        symptom::UrgencyTier,
    };
    use quickaid_core::traits::Analyzer;
    use quickaid_knowledge::KnowledgeBase;

    use super::*;

    struct Offline;

    impl ReplySource for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn symptom_reply(&self, _text: &str) -> TriageResult<String> {
            Err(TriageError::ExternalUnavailable {
                reason: "connection refused".to_string(),
            })
        }

        fn image_reply(&self, _image: &DecodedImage) -> TriageResult<String> {
            Err(TriageError::ExternalUnavailable {
                reason: "connection refused".to_string(),
            })
        }
    }

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    fn expect_malformed<T: std::fmt::Debug>(result: TriageResult<T>, needle: &str) {
        match result {
            Err(TriageError::MalformedExternalResponse { reason }) => {
                assert!(reason.contains(needle), "expected '{needle}' in '{reason}'");
            }
            other => panic!("expected MalformedExternalResponse, got {:?}", other),
        }
    }

    // ── 1. JSON location ─────────────────────────────────────────────────────

    #[test]
    fn test_json_object_is_found_inside_prose() {
        let reply = "Sure! Here is the analysis:\n```json\n{\"a\": {\"b\": 1}}\n```\nStay safe.";
        assert_eq!(extract_json_object(reply).unwrap(), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_reply_without_braces_is_malformed() {
        expect_malformed(extract_json_object("I cannot help with that."), "no JSON object");
        expect_malformed(extract_json_object("} backwards {"), "no JSON object");
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        expect_malformed(parse_image_reply("{not json}"), "invalid");
    }

    // ── 2. symptom replies ───────────────────────────────────────────────────

    #[test]
    fn test_symptom_reply_is_normalised() {
        let reply = r#"{
            "detected_symptoms": ["fever", 42],
            "possible_conditions": ["flu"],
            "urgency_level": "Low",
            "recommendations": ["Rest"]
        }"#;
        let a = parse_symptom_reply(&kb(), reply).unwrap();

        assert_eq!(a.detected_symptoms, vec!["fever", "42"]);
        assert_eq!(a.urgency_level, UrgencyTier::Low);
        assert_eq!(a.safety_tips, symptom_safety_tips(), "missing tips get the defaults");
        assert_eq!(a.disclaimer, EXTERNAL_DISCLAIMER);
        assert!(!a.emergency_alert.alert);
    }

    #[test]
    fn test_missing_urgency_defaults_to_medium() {
        let a = parse_symptom_reply(&kb(), r#"{"recommendations": ["Rest"]}"#).unwrap();
        assert_eq!(a.urgency_level, UrgencyTier::Medium);
    }

    #[test]
    fn test_unknown_urgency_is_malformed() {
        expect_malformed(
            parse_symptom_reply(&kb(), r#"{"urgency_level": "critical"}"#),
            "critical",
        );
    }

    #[test]
    fn test_non_list_field_is_malformed() {
        expect_malformed(
            parse_symptom_reply(&kb(), r#"{"recommendations": "rest"}"#),
            "'recommendations' is not a list",
        );
    }

    #[test]
    fn test_service_alert_flag_is_honoured() {
        let a = parse_symptom_reply(&kb(), r#"{"emergency_alert": true}"#).unwrap();
        assert!(a.emergency_alert.alert);
        assert!(a.emergency_alert.matched.is_empty());

        let b = parse_symptom_reply(&kb(), r#"{"emergency_alert": {"alert": true}}"#).unwrap();
        assert!(b.emergency_alert.alert);
    }

    #[test]
    fn test_detector_overrides_a_negative_service_flag() {
        let reply = r#"{
            "detected_symptoms": ["Severe headache", "nausea"],
            "urgency_level": "low",
            "emergency_alert": false
        }"#;
        let a = parse_symptom_reply(&kb(), reply).unwrap();

        assert!(a.emergency_alert.alert);
        assert_eq!(a.emergency_alert.matched, vec!["Severe headache"]);
        // Urgency stays whatever the service reported.
        assert_eq!(a.urgency_level, UrgencyTier::Low);
    }

    // ── 3. image replies ─────────────────────────────────────────────────────

    #[test]
    fn test_image_reply_defaults() {
        let a = parse_image_reply(r#"{"detected_conditions": ["minor cut"]}"#).unwrap();
        assert_eq!(a.confidence, Confidence::Level("medium".to_string()));
        assert_eq!(a.urgency, Some(UrgencyTier::Medium));
        assert_eq!(a.safety_tips, image_safety_tips());
    }

    #[test]
    fn test_numeric_confidence_is_a_score() {
        let a = parse_image_reply(r#"{"confidence": 0.85, "urgency": "high"}"#).unwrap();
        assert_eq!(a.confidence, Confidence::Score(0.85));
        assert_eq!(a.urgency, Some(UrgencyTier::High));
    }

    #[test]
    fn test_bad_confidence_type_is_malformed() {
        expect_malformed(parse_image_reply(r#"{"confidence": [1]}"#), "confidence");
    }

    // ── 4. analyzer ──────────────────────────────────────────────────────────

    #[test]
    fn test_recorded_reply_drives_the_analyzer() {
        let analyzer = ExternalAnalyzer::new(
            RecordedReply::new(r#"{"detected_conditions": ["burn"], "recommendations": ["Cool it"]}"#),
            Arc::new(kb()),
        );
        assert_eq!(analyzer.name(), "recorded-reply");

        let a = analyzer.analyze_image(&DecodedImage::uniform(1, 1, [0, 0, 0])).unwrap();
        assert_eq!(a.detected_conditions, vec!["burn"]);
    }

    #[test]
    fn test_unavailable_source_propagates() {
        let analyzer = ExternalAnalyzer::new(Offline, Arc::new(kb()));
        match analyzer.analyze_symptoms("fever") {
            Err(TriageError::ExternalUnavailable { reason }) => {
                assert_eq!(reason, "connection refused");
            }
            other => panic!("expected ExternalUnavailable, got {:?}", other),
        }
    }
}
