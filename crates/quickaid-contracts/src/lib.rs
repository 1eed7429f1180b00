//! # quickaid-contracts
//!
//! Shared types, response shapes, and error contracts for quickaid.
//!
//! Every crate in the workspace imports from here. No analysis logic lives in
//! this crate, only data definitions and error types.

pub mod analysis;
pub mod error;
pub mod image;
pub mod symptom;
pub mod verify;
