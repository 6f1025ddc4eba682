//! ListGuard Rules
//!
//! Compliance rule database and risk classifier.
//!
//! This crate provides:
//! - [`RiskDatabase`]: the three-tier term database built from a
//!   semi-structured rulebook document
//! - [`RiskClassifier`]: priority-ordered substring classification with
//!   category-conditional escalation
//! - [`overrides`]: the fixed (category, term) escalation table

pub mod classifier;
pub mod lexicon;
pub mod overrides;

pub use classifier::RiskClassifier;
pub use lexicon::RiskDatabase;
