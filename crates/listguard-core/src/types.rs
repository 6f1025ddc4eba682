//! Shared domain types for listing compliance

use serde::{Deserialize, Serialize};

/// Severity tier assigned to a compliance term.
///
/// Scan priority is fixed: Block beats Check beats Warn whenever a text
/// matches terms from several tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Legal red-line terms; any match stops the listing
    Block,
    /// Conditionally restricted terms, escalated only by category overrides
    Check,
    /// Marketing-risk terms; matches are reported but never block
    Warn,
}

impl Tier {
    /// All tiers in classification priority order
    pub const PRIORITY: [Tier; 3] = [Tier::Block, Tier::Check, Tier::Warn];
}

/// Outcome status of a compliance classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Warn,
    Block,
}

/// Result of classifying one text against the risk database.
///
/// Produced fresh per call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Classification status
    pub status: VerdictStatus,

    /// Human-readable explanation, including the matched term(s)
    pub message: String,
}

impl Verdict {
    /// A passing verdict
    pub fn pass() -> Self {
        Self {
            status: VerdictStatus::Pass,
            message: "通过".to_string(),
        }
    }

    /// A warning verdict with the given explanation
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Warn,
            message: message.into(),
        }
    }

    /// A blocking verdict with the given explanation
    pub fn block(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Block,
            message: message.into(),
        }
    }

    /// Whether this verdict blocks the listing
    pub fn is_block(&self) -> bool {
        self.status == VerdictStatus::Block
    }

    /// Whether this verdict passed clean
    pub fn is_pass(&self) -> bool {
        self.status == VerdictStatus::Pass
    }
}

/// One product listing submitted to the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingInput {
    /// Product category (e.g. 零食, 化妆品)
    pub category: String,

    /// Seller-authored selling-point text
    pub features: String,

    /// Reference to the main product image (URL or path)
    pub image_ref: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_priority_order() {
        assert_eq!(Tier::PRIORITY[0], Tier::Block);
        assert_eq!(Tier::PRIORITY[2], Tier::Warn);
    }

    #[test]
    fn test_verdict_constructors() {
        assert!(Verdict::pass().is_pass());
        assert!(Verdict::block("stop").is_block());

        let warn = Verdict::warn("careful");
        assert_eq!(warn.status, VerdictStatus::Warn);
        assert!(!warn.is_block());
        assert!(!warn.is_pass());
    }

    #[test]
    fn test_tier_serde_roundtrip() {
        let json = serde_json::to_string(&Tier::Check).unwrap();
        assert_eq!(json, "\"check\"");
        let tier: Tier = serde_json::from_str(&json).unwrap();
        assert_eq!(tier, Tier::Check);
    }
}
