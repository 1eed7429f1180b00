//! # quickaid-verify
//!
//! Response verification for quickaid.
//!
//! [`engine::SchemaVerifier`] implements [`quickaid_core::traits::Verifier`].
//! It checks a serialized analysis in two phases:
//!
//! 1. **Structural**: JSON Schema validation via the `jsonschema` crate.
//! 2. **Semantic**: declarative rules (`RequiredField`, `NonEmptyList`,
//!    `AllowedValues`, `NumberRange`, `Custom`).
//!
//! [`schemas`] holds the schemas for the symptom and image responses.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use quickaid_verify::schemas::{response_schemas, standard_verifier};
//!
//! let verifier = standard_verifier();
//! let schemas = response_schemas();
//! let report = verifier.verify(&payload, &schemas.symptoms)?;
//! ```

pub mod engine;
pub mod schemas;

pub use engine::SchemaVerifier;
pub use schemas::{response_schemas, standard_verifier};
