//! Trait seams for the quickaid pipeline.
//!
//! - `Analyzer` is implemented by the deterministic rule engine and by any
//!   adapter that fronts an external analysis service.
//! - `Verifier` checks a serialized result before it leaves the pipeline.
//!
//! The pipeline wires them together: external analyzer first (if any), rule
//! engine second, verifier on every result.

use quickaid_contracts::{
    analysis::{ImageAnalysis, SymptomAnalysis},
    error::TriageResult,
    image::DecodedImage,
    verify::{ResponseSchema, VerificationReport},
};

/// Something that can turn symptom text or an image into an analysis.
///
/// Implementations must be pure functions of their input from the pipeline's
/// point of view: no implementation may assume another stage ran before it.
pub trait Analyzer: Send + Sync {
    /// Short name for logs, e.g. "rule-engine".
    fn name(&self) -> &str;

    /// Analyse a free-text symptom description.
    ///
    /// The text may be raw; implementations normalise case themselves.
    fn analyze_symptoms(&self, text: &str) -> TriageResult<SymptomAnalysis>;

    /// Analyse a decoded RGB image.
    fn analyze_image(&self, image: &DecodedImage) -> TriageResult<ImageAnalysis>;
}

/// The response verifier: the last gate before a result is returned.
///
/// Implementations inspect the serialized payload against a declarative
/// `ResponseSchema`. A failing report means the payload must not be used.
pub trait Verifier: Send + Sync {
    fn verify(
        &self,
        payload: &serde_json::Value,
        schema: &ResponseSchema,
    ) -> TriageResult<VerificationReport>;
}
