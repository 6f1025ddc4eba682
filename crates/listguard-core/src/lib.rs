//! ListGuard Core
//!
//! Core types and error handling shared across ListGuard components.
//!
//! This crate provides:
//! - The compliance tier and verdict types used by the classifier and pipeline
//! - Error types and result handling, including the external-service taxonomy
//! - The listing input type that enters the pipeline

pub mod error;
pub mod types;

pub use error::{Error, Result, ServiceError};
pub use types::{ListingInput, Tier, Verdict, VerdictStatus};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result, ServiceError};
    pub use crate::types::{ListingInput, Tier, Verdict, VerdictStatus};
}
