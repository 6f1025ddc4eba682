//! Per-run pipeline state and outcome types

use listguard_core::{ListingInput, Verdict};

/// Transient state of one pipeline run.
///
/// Created at pipeline start, owned exclusively by the orchestrator,
/// discarded at pipeline end.
#[derive(Debug)]
pub struct PipelineContext {
    /// Product category
    pub category: String,

    /// Seller-authored selling-point text
    pub features: String,

    /// Reference to the main product image
    pub image_ref: String,

    /// Text extracted from the image by the vision stage
    pub ocr_text: String,

    /// Compliance verdict on the OCR text
    pub ocr_verdict: Option<Verdict>,

    /// Compliance verdict on the feature text
    pub feature_verdict: Option<Verdict>,

    /// Corrective instruction for the generation stage, set when the
    /// feature text blocked
    pub corrective_instruction: Option<String>,
}

impl PipelineContext {
    /// Start a fresh context for one listing
    pub fn new(input: &ListingInput) -> Self {
        Self {
            category: input.category.clone(),
            features: input.features.clone(),
            image_ref: input.image_ref.clone(),
            ocr_text: String::new(),
            ocr_verdict: None,
            feature_verdict: None,
            corrective_instruction: None,
        }
    }
}

/// Which stage aborted the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortStage {
    /// The vision model flagged the image as unsafe
    VisionAudit,

    /// The OCR-derived text hit a blocking compliance rule
    OcrCompliance,
}

impl AbortStage {
    /// Short label used in logs and output
    pub fn label(&self) -> &'static str {
        match self {
            Self::VisionAudit => "vision-audit",
            Self::OcrCompliance => "ocr-compliance",
        }
    }
}

/// Copy produced by a completed run
#[derive(Debug, Clone)]
pub struct GeneratedCopy {
    /// Generated listing copy, or the formatted failure string when the
    /// generation call did not succeed
    pub text: String,

    /// Whether generation ran under a corrective instruction
    pub corrected: bool,
}

/// Terminal result of one pipeline run
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The run reached the generation stage; `text` is its output
    Completed(GeneratedCopy),

    /// The run hit a fatal gate and generation never ran
    Aborted {
        stage: AbortStage,
        reason: String,
    },
}

impl PipelineOutcome {
    /// Whether the run completed (even with a formatted failure string)
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}
