//! Generation stage adapter
//!
//! Assembles the fixed copy-generation prompt and wraps the external
//! text-generation call. The contract is "always returns a string": service
//! failures come back as formatted failure text, never as an error.

use crate::client::GenerationService;
use std::sync::Arc;
use tracing::{info, warn};

/// Assemble the copy-generation prompt.
///
/// The template fixes the persona, the three-title ask, the length ceiling,
/// and the superlative-claim prohibition; a non-empty corrective
/// instruction is appended as a final must-fix directive.
pub fn build_prompt(
    category: &str,
    features: &str,
    ocr_text: &str,
    corrective: Option<&str>,
) -> String {
    let mut prompt = format!(
        "你是一个淘宝SEO专家。请根据以下信息生成3个高点击率标题：\n\
         - 类目: {}\n\
         - 核心卖点: {}\n\
         - 图片文字: {}\n\n\
         要求：\n\
         1. 30字以内，包含长尾词。\n\
         2. 严禁使用“第一”、“最”等广告法违禁词。",
        category, features, ocr_text
    );

    if let Some(instruction) = corrective.filter(|s| !s.is_empty()) {
        prompt.push_str(&format!(
            "\n\n【重要修正指令】: {}，请在生成时修正上述问题。",
            instruction
        ));
    }

    prompt
}

/// Generation stage over an external text-generation service
pub struct GenerationStage {
    service: Arc<dyn GenerationService>,
}

impl GenerationStage {
    /// Create a generation stage over the given service
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self { service }
    }

    /// Generate listing copy. Always returns a string describing either the
    /// generated content or the reason it wasn't produced.
    pub async fn generate(
        &self,
        category: &str,
        features: &str,
        ocr_text: &str,
        corrective: Option<&str>,
    ) -> String {
        let prompt = build_prompt(category, features, ocr_text, corrective);

        match self.service.complete(&prompt).await {
            Ok(text) => {
                info!(chars = text.chars().count(), "copy generation succeeded");
                text
            }
            Err(listguard_core::ServiceError::Api { code, message, .. }) => {
                warn!(code = %code, "generation service rejected the request");
                format!("生成失败: {} - {}", code, message)
            }
            Err(err) => {
                warn!(error = %err, "generation call failed");
                format!("调用异常: {}", err)
            }
        }
    }
}
