//! Pipeline orchestrator
//!
//! Linear state machine with branch points:
//!
//! ```text
//! VISION -> (abort if audit fails)
//!        -> CLASSIFY_OCR -> (abort if Block)
//!        -> CLASSIFY_FEATURES -> (Block records a corrective instruction, run continues)
//!        -> GENERATE -> END
//! ```
//!
//! OCR text comes from the product image itself, which the seller cannot
//! rewrite at generation time, so a violation there is fatal. Feature text
//! is seller-authored and the generation stage can rephrase it, so a
//! violation there becomes a corrective instruction instead of a stop.

use crate::context::{AbortStage, GeneratedCopy, PipelineContext, PipelineOutcome};
use listguard_core::ListingInput;
use listguard_llm::{GenerationStage, VisionStage};
use listguard_rules::RiskClassifier;
use tracing::{info, warn};

/// Orchestrates the vision, compliance, and generation stages for one
/// listing at a time.
pub struct Pipeline {
    classifier: RiskClassifier,
    vision: VisionStage,
    generation: GenerationStage,
}

impl Pipeline {
    /// Assemble a pipeline from its three stages
    pub fn new(classifier: RiskClassifier, vision: VisionStage, generation: GenerationStage) -> Self {
        Self {
            classifier,
            vision,
            generation,
        }
    }

    /// Run one listing through the pipeline.
    ///
    /// Always terminates with an outcome: either the generation output
    /// (success or formatted failure string) or a structured abort reason.
    pub async fn run(&self, input: &ListingInput) -> PipelineOutcome {
        let mut ctx = PipelineContext::new(input);

        info!(category = %ctx.category, image = %ctx.image_ref, "pipeline start");

        // Stage 1: vision analysis. Degraded calls pass through the stage
        // adapter; only an explicit audit failure stops the run.
        let analysis = self.vision.analyze(&ctx.image_ref).await;
        if !analysis.audit_pass {
            warn!(reason = %analysis.audit_message, "aborting: image failed content audit");
            return PipelineOutcome::Aborted {
                stage: AbortStage::VisionAudit,
                reason: analysis.audit_message,
            };
        }
        ctx.ocr_text = analysis.extracted_text;

        // Stage 2a: OCR text compliance. A block here is fatal.
        let ocr_verdict = self.classifier.classify(&ctx.ocr_text, &ctx.category);
        if ocr_verdict.is_block() {
            warn!(reason = %ocr_verdict.message, "aborting: image text violates compliance rules");
            return PipelineOutcome::Aborted {
                stage: AbortStage::OcrCompliance,
                reason: ocr_verdict.message,
            };
        }
        info!(status = ?ocr_verdict.status, "ocr text classified");
        ctx.ocr_verdict = Some(ocr_verdict);

        // Stage 2b: feature text compliance. A block is correctable input:
        // record the violation and instruct generation to fix it. Warn
        // verdicts never escalate.
        let feature_verdict = self.classifier.classify(&ctx.features, &ctx.category);
        if feature_verdict.is_block() {
            warn!(reason = %feature_verdict.message, "feature text blocked, requesting corrective rewrite");
            ctx.corrective_instruction = Some(format!(
                "注意：原始卖点存在违规[{}]，必须修改为合规用语。",
                feature_verdict.message
            ));
        } else {
            info!(status = ?feature_verdict.status, "feature text classified");
        }
        ctx.feature_verdict = Some(feature_verdict);

        // Stage 3: generation. Runs whenever no earlier abort occurred; its
        // output is terminal regardless of content.
        let text = self
            .generation
            .generate(
                &ctx.category,
                &ctx.features,
                &ctx.ocr_text,
                ctx.corrective_instruction.as_deref(),
            )
            .await;

        info!("pipeline complete");
        PipelineOutcome::Completed(GeneratedCopy {
            text,
            corrected: ctx.corrective_instruction.is_some(),
        })
    }
}
