//! aferir-bedrock
//!
//! Narrative generation for scored sessions via the Bedrock Converse API.
//! The model output is stored next to the result and never fed back into
//! scoring.

pub mod client;
pub mod error;
pub mod generator;
pub mod narrative;
pub mod prompt;
pub mod tokens;
