//! aferir-core
//!
//! Pure domain types and storage key conventions.
//! No AWS SDK dependency. This is the shared vocabulary of the Aferir system.

pub mod error;
pub mod keys;
pub mod models;
