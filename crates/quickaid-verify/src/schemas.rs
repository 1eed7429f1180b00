//! The response schemas for both analysis paths and a verifier with the
//! custom rules they reference.

use serde_json::{json, Value};

use quickaid_contracts::verify::{
    ResponseSchema, ResponseSchemas, VerificationRule, VerificationRuleType,
};

use crate::engine::SchemaVerifier;

pub const SYMPTOM_SCHEMA_ID: &str = "symptom-response-v1";
pub const IMAGE_SCHEMA_ID: &str = "image-response-v1";

/// Name of the custom rule checking that a raised alert carries its texts.
pub const EMERGENCY_CONSISTENT: &str = "emergency-alert-consistent";

fn rule(id: &str, description: &str, rule_type: VerificationRuleType) -> VerificationRule {
    VerificationRule {
        rule_id: id.to_string(),
        description: description.to_string(),
        rule_type,
    }
}

fn field(path: &str) -> String {
    path.to_string()
}

fn urgency_values() -> Vec<Value> {
    vec![json!("low"), json!("medium"), json!("high")]
}

pub fn symptom_response_schema() -> ResponseSchema {
    let strings = json!({ "type": "array", "items": { "type": "string" } });
    ResponseSchema {
        schema_id: SYMPTOM_SCHEMA_ID.to_string(),
        json_schema: json!({
            "type": "object",
            "required": [
                "detected_symptoms",
                "possible_conditions",
                "urgency_level",
                "recommendations",
                "emergency_alert",
                "safety_tips",
                "disclaimer"
            ],
            "properties": {
                "detected_symptoms": strings,
                "possible_conditions": strings,
                "urgency_level": { "type": "string" },
                "recommendations": strings,
                "emergency_alert": {
                    "type": "object",
                    "required": ["alert"],
                    "properties": {
                        "alert": { "type": "boolean" },
                        "symptoms": strings,
                        "message": { "type": "string" },
                        "action": { "type": "string" }
                    }
                },
                "safety_tips": strings,
                "disclaimer": { "type": "string" }
            }
        }),
        rules: vec![
            rule(
                "non-empty-recommendations",
                "at least one recommendation",
                VerificationRuleType::NonEmptyList {
                    field_path: field("recommendations"),
                },
            ),
            rule(
                "req-disclaimer",
                "disclaimer must be present and non-blank",
                VerificationRuleType::RequiredField {
                    field_path: field("disclaimer"),
                },
            ),
            rule(
                "allowed-urgency",
                "urgency_level is low, medium or high",
                VerificationRuleType::AllowedValues {
                    field_path: field("urgency_level"),
                    allowed: urgency_values(),
                },
            ),
            rule(
                "emergency-consistent",
                "a raised alert carries its message and action",
                VerificationRuleType::Custom {
                    function_name: EMERGENCY_CONSISTENT.to_string(),
                },
            ),
        ],
    }
}

pub fn image_response_schema() -> ResponseSchema {
    let strings = json!({ "type": "array", "items": { "type": "string" } });
    ResponseSchema {
        schema_id: IMAGE_SCHEMA_ID.to_string(),
        json_schema: json!({
            "type": "object",
            "required": [
                "detected_conditions",
                "confidence",
                "recommendations",
                "safety_tips",
                "disclaimer"
            ],
            "properties": {
                "detected_conditions": strings,
                "confidence": { "type": ["number", "string"] },
                "recommendations": strings,
                "urgency": { "enum": urgency_values() },
                "safety_tips": strings,
                "disclaimer": { "type": "string" }
            }
        }),
        rules: vec![
            rule(
                "non-empty-recommendations",
                "at least one recommendation",
                VerificationRuleType::NonEmptyList {
                    field_path: field("recommendations"),
                },
            ),
            rule(
                "req-disclaimer",
                "disclaimer must be present and non-blank",
                VerificationRuleType::RequiredField {
                    field_path: field("disclaimer"),
                },
            ),
            rule(
                "confidence-range",
                "numeric confidence lies in [0, 1]",
                VerificationRuleType::NumberRange {
                    field_path: field("confidence"),
                    min: 0.0,
                    max: 1.0,
                },
            ),
        ],
    }
}

pub fn response_schemas() -> ResponseSchemas {
    ResponseSchemas {
        symptoms: symptom_response_schema(),
        image: image_response_schema(),
    }
}

fn emergency_consistent(payload: &Value) -> Option<String> {
    let flag = payload.get("emergency_alert")?;
    if !flag.get("alert").and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }
    let blank = |key: &str| {
        flag.get(key)
            .and_then(Value::as_str)
            .map_or(true, |s| s.trim().is_empty())
    };
    if blank("message") || blank("action") {
        Some("emergency alert raised without message or action".to_string())
    } else {
        None
    }
}

/// A `SchemaVerifier` with every custom rule the response schemas use.
pub fn standard_verifier() -> SchemaVerifier {
    let mut verifier = SchemaVerifier::new();
    verifier.register_rule(EMERGENCY_CONSISTENT, Box::new(emergency_consistent));
    verifier
}
