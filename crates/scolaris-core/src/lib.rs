//! scolaris-core: Academic evaluation and deliberation engine.
//!
//! This crate defines the school data model, the score store abstraction,
//! and the engine operations that the rest of the scolaris system builds on:
//! weighted grade aggregation, transcript building, and jury deliberation.

pub mod deliberation;
pub mod error;
pub mod grading;
pub mod model;
pub mod store;
pub mod transcript;

pub use error::EngineError;
