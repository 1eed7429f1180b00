//! The quickaid pipeline: external stage, deterministic fallback, boundary.
//!
//!   Input → [external Analyzer → Verify] → fallback Analyzer → Verify → Response
//!
//! The external stage is optional and best-effort. Any error it returns, and
//! any result that fails verification, falls through to the fallback analyzer.
//! The fallback's own result is verified too; if that fails the request
//! degrades to a `GuidanceMessage`. `respond_*` never returns an error and
//! never returns a result without recommendations and a disclaimer.

use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use quickaid_contracts::{
    analysis::{
        AnalysisKind, AnalysisResponse, AnalysisResult, GuidanceMessage, ImageAnalysis,
        SymptomAnalysis,
    },
    error::{TriageError, TriageResult},
    image::DecodedImage,
    verify::{ResponseSchema, ResponseSchemas},
};

use crate::traits::{Analyzer, Verifier};

/// Disclaimer attached to every guidance message.
pub const GUIDANCE_DISCLAIMER: &str = "This tool cannot replace professional medical advice.";

/// Drives one analysis request through the configured stages.
///
/// A pipeline holds only immutable components and can serve concurrent
/// requests from several threads.
pub struct Pipeline {
    external: Option<Box<dyn Analyzer>>,
    fallback: Box<dyn Analyzer>,
    verifier: Box<dyn Verifier>,
    schemas: ResponseSchemas,
}

impl Pipeline {
    /// Create a pipeline with no external stage.
    pub fn new(
        fallback: Box<dyn Analyzer>,
        verifier: Box<dyn Verifier>,
        schemas: ResponseSchemas,
    ) -> Self {
        Self {
            external: None,
            fallback,
            verifier,
            schemas,
        }
    }

    /// Try `external` before the fallback analyzer on every request.
    pub fn with_external(mut self, external: Box<dyn Analyzer>) -> Self {
        self.external = Some(external);
        self
    }

    pub fn has_external(&self) -> bool {
        self.external.is_some()
    }

    /// Analyse symptom text, returning the first verified result.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for blank text (no stage is called), otherwise whatever
    /// the fallback analyzer returns, or `VerificationFailed` if its result
    /// does not pass the symptom schema.
    pub fn analyze_symptoms(&self, text: &str) -> TriageResult<SymptomAnalysis> {
        let request_id = Uuid::new_v4();
        let _span = info_span!("analyze_symptoms", %request_id).entered();

        if text.trim().is_empty() {
            debug!("empty symptom text");
            return Err(TriageError::EmptyInput);
        }

        if let Some(external) = &self.external {
            let attempt = external
                .analyze_symptoms(text)
                .and_then(|analysis| self.check(&analysis, &self.schemas.symptoms).map(|()| analysis));
            match attempt {
                Ok(analysis) => {
                    info!(analyzer = external.name(), "external stage answered");
                    return Ok(analysis);
                }
                Err(e) => {
                    warn!(
                        analyzer = external.name(),
                        error = %e,
                        "external stage failed, falling back"
                    );
                }
            }
        }

        let analysis = self.fallback.analyze_symptoms(text)?;
        self.check(&analysis, &self.schemas.symptoms)?;
        info!(
            analyzer = self.fallback.name(),
            urgency = %analysis.urgency_level,
            emergency = analysis.emergency_alert.alert,
            "symptom analysis complete"
        );
        Ok(analysis)
    }

    /// Analyse a decoded image, returning the first verified result.
    ///
    /// # Errors
    ///
    /// Whatever the fallback analyzer returns (typically `InvalidImage`), or
    /// `VerificationFailed` if its result does not pass the image schema.
    pub fn analyze_image(&self, image: &DecodedImage) -> TriageResult<ImageAnalysis> {
        let request_id = Uuid::new_v4();
        let _span = info_span!(
            "analyze_image",
            %request_id,
            width = image.width,
            height = image.height
        )
        .entered();

        if let Some(external) = &self.external {
            let attempt = external
                .analyze_image(image)
                .and_then(|analysis| self.check(&analysis, &self.schemas.image).map(|()| analysis));
            match attempt {
                Ok(analysis) => {
                    info!(analyzer = external.name(), "external stage answered");
                    return Ok(analysis);
                }
                Err(e) => {
                    warn!(
                        analyzer = external.name(),
                        error = %e,
                        "external stage failed, falling back"
                    );
                }
            }
        }

        let analysis = self.fallback.analyze_image(image)?;
        self.check(&analysis, &self.schemas.image)?;
        info!(
            analyzer = self.fallback.name(),
            conditions = analysis.detected_conditions.len(),
            "image analysis complete"
        );
        Ok(analysis)
    }

    /// Like `analyze_symptoms`, with every error recovered into guidance.
    pub fn respond_symptoms(&self, text: &str) -> AnalysisResponse {
        match self.analyze_symptoms(text) {
            Ok(analysis) => AnalysisResponse::Analysis(AnalysisResult::Symptoms(analysis)),
            Err(e) => AnalysisResponse::Guidance(guidance_for(AnalysisKind::Symptoms, &e)),
        }
    }

    /// Like `analyze_image`, with every error recovered into guidance.
    pub fn respond_image(&self, image: &DecodedImage) -> AnalysisResponse {
        match self.analyze_image(image) {
            Ok(analysis) => AnalysisResponse::Analysis(AnalysisResult::Image(analysis)),
            Err(e) => AnalysisResponse::Guidance(guidance_for(AnalysisKind::Image, &e)),
        }
    }

    fn check<T: Serialize>(&self, result: &T, schema: &ResponseSchema) -> TriageResult<()> {
        let payload = serde_json::to_value(result).map_err(|e| TriageError::VerificationFailed {
            reason: format!("result could not be serialized: {e}"),
        })?;

        let report = self.verifier.verify(&payload, schema)?;
        if !report.passed {
            let summary = report.summary();
            warn!(schema_id = %schema.schema_id, failures = %summary, "result failed verification");
            return Err(TriageError::VerificationFailed { reason: summary });
        }
        Ok(())
    }
}

/// Build the safe "could not analyze" block for a failed request.
///
/// Never returns empty `recommendations` or an empty `disclaimer`.
pub fn guidance_for(kind: AnalysisKind, err: &TriageError) -> GuidanceMessage {
    let (error, recommendation) = match (kind, err) {
        (_, TriageError::NoSymptomsRecognized) => (
            "No recognizable symptoms found".to_string(),
            "Please describe your symptoms more specifically",
        ),
        (AnalysisKind::Symptoms, TriageError::EmptyInput) => (
            "No symptoms provided".to_string(),
            "Please describe your symptoms more specifically",
        ),
        (AnalysisKind::Image, TriageError::EmptyInput) => (
            "No file selected".to_string(),
            "Unable to analyze image. Please consult a healthcare professional.",
        ),
        (AnalysisKind::Symptoms, other) => (
            format!("Symptom analysis failed: {other}"),
            "Unable to analyze symptoms. Please consult a healthcare professional.",
        ),
        (AnalysisKind::Image, other) => (
            format!("Image analysis failed: {other}"),
            "Unable to analyze image. Please consult a healthcare professional.",
        ),
    };

    GuidanceMessage {
        error,
        recommendations: vec![recommendation.to_string()],
        disclaimer: GUIDANCE_DISCLAIMER.to_string(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
