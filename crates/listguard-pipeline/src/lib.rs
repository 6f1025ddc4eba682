//! ListGuard Pipeline
//!
//! Orchestration of the three-stage listing workflow: vision analysis,
//! compliance classification, and copy generation, with per-stage failure
//! policy (abort, escalate-and-continue, or degrade).

pub mod context;
pub mod orchestrator;

pub use context::{AbortStage, GeneratedCopy, PipelineContext, PipelineOutcome};
pub use orchestrator::Pipeline;
