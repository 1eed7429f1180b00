//! Response schema and verification report types.
//!
//! Before an analysis leaves the pipeline it is serialized and checked
//! against a `ResponseSchema`. Only a passing `VerificationReport` lets the
//! result through; anything else degrades to guidance or, for the external
//! stage, to the rule engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON Schema document plus the rules it cannot express.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Unique identifier, e.g. "symptom-response-v1".
    pub schema_id: String,
    /// Structural constraints. `Value::Null` disables structural validation.
    pub json_schema: Value,
    /// Evaluated after structural validation, in order.
    pub rules: Vec<VerificationRule>,
}

/// The schemas for both analysis paths, handed to the pipeline at start-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSchemas {
    pub symptoms: ResponseSchema,
    pub image: ResponseSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRule {
    /// Referenced in failure reports.
    pub rule_id: String,
    pub description: String,
    pub rule_type: VerificationRuleType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationRuleType {
    /// The field at `field_path` must be present and non-null.
    RequiredField {
        /// Dotted path, e.g. "emergency_alert.alert".
        field_path: String,
    },

    /// The field at `field_path` must be an array with at least one
    /// non-blank string.
    NonEmptyList { field_path: String },

    /// The field at `field_path` must equal one of `allowed`.
    AllowedValues {
        field_path: String,
        allowed: Vec<Value>,
    },

    /// When the field at `field_path` is a number it must lie in
    /// `[min, max]`. Non-numeric values are not checked.
    NumberRange {
        field_path: String,
        min: f64,
        max: f64,
    },

    /// Delegate to a named function registered on the verifier.
    Custom { function_name: String },
}

/// Outcome of checking one payload against one schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if every rule passed.
    pub passed: bool,
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    /// All failures joined as `[rule] message; ...`.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    pub rule_id: String,
    pub message: String,
}
