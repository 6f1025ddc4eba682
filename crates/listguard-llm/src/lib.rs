//! ListGuard LLM
//!
//! Adapters for the two external model services the pipeline consumes.
//!
//! This crate provides:
//! - [`DashScopeClient`]: HTTP client implementing the vision and
//!   generation wire contracts with a per-call deadline and single retry
//! - [`VisionStage`]: vision analysis with the degrade-to-stub policy
//! - [`GenerationStage`]: prompt assembly and always-a-string generation
//! - [`mock`]: scripted backends for tests and demos

pub mod client;
pub mod generation;
pub mod mock;
pub mod vision;

pub use client::{DashScopeClient, GenerationService, ServiceConfig, VisionService};
pub use generation::{build_prompt, GenerationStage};
pub use vision::{VisionAnalysis, VisionStage, FALLBACK_OCR_TEXT};
