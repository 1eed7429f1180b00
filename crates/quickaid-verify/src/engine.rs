//! Schema-based response verifier.
//!
//! `SchemaVerifier` implements the `Verifier` trait from `quickaid-core`.
//! A serialized analysis is checked in two phases:
//!
//! 1. **Structural**: the payload is validated against
//!    `ResponseSchema::json_schema` with the `jsonschema` crate.
//! 2. **Semantic**: each `VerificationRule` in `ResponseSchema::rules` is
//!    evaluated in order.
//!
//! All failures are collected before returning, so a report lists every
//! problem with a payload at once.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use quickaid_contracts::{
    error::TriageResult,
    verify::{ResponseSchema, VerificationFailure, VerificationReport, VerificationRuleType},
};
use quickaid_core::traits::Verifier;

/// A caller-supplied check over the whole payload.
///
/// Returns `Some(message)` when the check fails, `None` when it passes.
pub type CustomVerifierFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// JSON Schema validation plus declarative semantic rules.
pub struct SchemaVerifier {
    custom_rules: HashMap<String, CustomVerifierFn>,
}

impl SchemaVerifier {
    /// A verifier with no custom rules registered.
    pub fn new() -> Self {
        Self {
            custom_rules: HashMap::new(),
        }
    }

    /// Register `f` under `name` for `VerificationRuleType::Custom` rules.
    ///
    /// Registering the same name twice replaces the earlier function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomVerifierFn) {
        self.custom_rules.insert(name.into(), f);
    }

    /// Resolve a dotted path (e.g. `"emergency_alert.alert"`). `None` when a
    /// segment is missing or the value is `null`.
    fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
        let mut current = value;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(v) if !v.is_null() => current = v,
                _ => return None,
            }
        }
        Some(current)
    }

    fn evaluate(&self, payload: &Value, rule_type: &VerificationRuleType) -> Option<String> {
        match rule_type {
            VerificationRuleType::RequiredField { field_path } => {
                match Self::resolve_path(payload, field_path) {
                    None => Some(format!("required field '{field_path}' is missing or null")),
                    Some(Value::String(s)) if s.trim().is_empty() => {
                        Some(format!("required field '{field_path}' is blank"))
                    }
                    Some(_) => None,
                }
            }

            VerificationRuleType::NonEmptyList { field_path } => {
                match Self::resolve_path(payload, field_path) {
                    Some(Value::Array(items))
                        if items
                            .iter()
                            .any(|v| v.as_str().is_some_and(|s| !s.trim().is_empty())) =>
                    {
                        None
                    }
                    Some(Value::Array(_)) => {
                        Some(format!("list '{field_path}' has no non-blank entries"))
                    }
                    Some(_) => Some(format!("field '{field_path}' is not a list")),
                    None => Some(format!("list '{field_path}' is missing")),
                }
            }

            VerificationRuleType::AllowedValues { field_path, allowed } => {
                match Self::resolve_path(payload, field_path) {
                    None => Some(format!(
                        "field '{field_path}' is missing; cannot check allowed values"
                    )),
                    Some(actual) if allowed.contains(actual) => None,
                    Some(actual) => Some(format!(
                        "field '{field_path}' has value {actual} which is not in the allowed set"
                    )),
                }
            }

            // Only numbers are range-checked; a word such as "medium" passes.
            VerificationRuleType::NumberRange {
                field_path,
                min,
                max,
            } => match Self::resolve_path(payload, field_path).and_then(Value::as_f64) {
                Some(n) if n < *min || n > *max => Some(format!(
                    "field '{field_path}' is {n}, outside [{min}, {max}]"
                )),
                _ => None,
            },

            // An unregistered name is itself a failure.
            VerificationRuleType::Custom { function_name } => {
                match self.custom_rules.get(function_name.as_str()) {
                    Some(f) => f(payload),
                    None => Some(format!(
                        "no custom rule registered for function name '{function_name}'"
                    )),
                }
            }
        }
    }
}

impl Default for SchemaVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier for SchemaVerifier {
    fn verify(&self, payload: &Value, schema: &ResponseSchema) -> TriageResult<VerificationReport> {
        let mut failures: Vec<VerificationFailure> = Vec::new();

        // ── Phase 1: JSON Schema ──────────────────────────────────────────────
        if !schema.json_schema.is_null() {
            match jsonschema::validator_for(&schema.json_schema) {
                Ok(validator) => {
                    for error in validator.iter_errors(payload) {
                        let message = format!(
                            "JSON Schema violation at {}: {}",
                            error.instance_path, error
                        );
                        warn!(schema_id = %schema.schema_id, %message, "structural validation failure");
                        failures.push(VerificationFailure {
                            rule_id: "json-schema".to_string(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    let message = format!("invalid JSON Schema document: {e}");
                    warn!(schema_id = %schema.schema_id, %message, "schema compilation failure");
                    failures.push(VerificationFailure {
                        rule_id: "json-schema".to_string(),
                        message,
                    });
                }
            }
        }

        // ── Phase 2: semantic rules ───────────────────────────────────────────
        for rule in &schema.rules {
            debug!(rule_id = %rule.rule_id, description = %rule.description, "evaluating rule");

            if let Some(message) = self.evaluate(payload, &rule.rule_type) {
                warn!(rule_id = %rule.rule_id, %message, "semantic rule failed");
                failures.push(VerificationFailure {
                    rule_id: rule.rule_id.clone(),
                    message,
                });
            }
        }

        let passed = failures.is_empty();
        debug!(
            schema_id = %schema.schema_id,
            passed,
            failure_count = failures.len(),
            "verification complete"
        );

        Ok(VerificationReport { passed, failures })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
