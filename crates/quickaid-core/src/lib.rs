//! # quickaid-core
//!
//! The analysis pipeline for quickaid.
//!
//! This crate provides:
//! - The two trait seams (`Analyzer`, `Verifier`)
//! - The `Pipeline` that tries an optional external analyzer, falls back to
//!   the deterministic rule engine, verifies every result, and recovers
//!   errors into guidance at the boundary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quickaid_core::{Pipeline, traits::{Analyzer, Verifier}};
//!
//! let pipeline = Pipeline::new(Box::new(rule_engine), Box::new(verifier), schemas);
//! let response = pipeline.respond_symptoms("I have a fever and a headache");
//! ```

pub mod pipeline;
pub mod traits;

pub use pipeline::{guidance_for, Pipeline, GUIDANCE_DISCLAIMER};
