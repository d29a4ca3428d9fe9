//! aferir-storage
//!
//! Session persistence. Thin wrapper around the AWS S3 SDK, plus the
//! [`store::SessionStore`] seam used by the service layer.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod state;
pub mod store;
