//! Priority-ordered risk classifier
//!
//! Scans a text against the tiered database with fixed priority: a Block
//! match ends the scan immediately, Check matches are escalated only
//! through the category override table, and Warn matches are aggregated
//! into a single advisory verdict. Classification is lexical substring
//! containment, accepted as a conservative bias toward flagging.

use crate::lexicon::RiskDatabase;
use crate::overrides;
use listguard_core::{Tier, Verdict};
use std::sync::Arc;
use tracing::debug;

/// Stateless classifier over a shared, immutable risk database
#[derive(Clone)]
pub struct RiskClassifier {
    db: Arc<RiskDatabase>,
}

impl RiskClassifier {
    /// Create a classifier over the given database
    pub fn new(db: Arc<RiskDatabase>) -> Self {
        Self { db }
    }

    /// Classify `text` for the given product category.
    ///
    /// Pure with respect to the database: identical inputs always yield
    /// identical verdicts.
    pub fn classify(&self, text: &str, category: &str) -> Verdict {
        if let Some(term) = self.db.find_first(Tier::Block, text) {
            return Verdict::block(format!("【红线拦截】检测到法律禁止用语：{}", term));
        }

        for term in self.db.find_all(Tier::Check, text) {
            if let Some(group) = overrides::escalation(category, term) {
                return Verdict::block(format!("【类目违规】{}违禁：{}", group, term));
            }
            // A Check match outside the override table changes nothing;
            // these terms await manual review.
            debug!(term, category, "check-tier match without escalation");
        }

        let warnings = self.db.find_all(Tier::Warn, text);
        if !warnings.is_empty() {
            return Verdict::warn(format!("文案包含营销风险词：{}", warnings.join("、")));
        }

        Verdict::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listguard_core::VerdictStatus;

    const RULEBOOK: &str = "\
一、法律红线类\n\
| 所有商品 | 国家级、最高级 最低价 |\n\
五、条件限制类\n\
| 所有商品 | 药妆、治疗 祖传秘方，增强免疫力 抗癌 |\n\
二、营销夸大类\n\
| 所有商品 | 限时秒杀、全民疯抢 |\n";

    fn classifier() -> RiskClassifier {
        RiskClassifier::new(Arc::new(RiskDatabase::parse(RULEBOOK).unwrap()))
    }

    #[test]
    fn test_clean_text_passes() {
        let verdict = classifier().classify("好吃不贵 新鲜直达", "零食");
        assert!(verdict.is_pass());
    }

    #[test]
    fn test_block_term_blocks_regardless_of_category() {
        for category in ["零食", "化妆品", "apparel", "通用"] {
            let verdict = classifier().classify("全网最低价 好吃不贵", category);
            assert!(verdict.is_block(), "category {} should block", category);
            assert!(verdict.message.contains("最低价"));
            assert!(verdict.message.contains("红线拦截"));
        }
    }

    #[test]
    fn test_block_outranks_check_and_warn() {
        // Text carries a term from every tier; Block must win.
        let verdict = classifier().classify("最低价 祖传秘方 限时秒杀", "零食");
        assert!(verdict.is_block());
        assert!(verdict.message.contains("最低价"));
    }

    #[test]
    fn test_cosmetics_override_escalates_check_term() {
        let verdict = classifier().classify("含药妆成分", "cosmetics");
        assert!(verdict.is_block());
        assert!(verdict.message.contains("类目违规"));
        assert!(verdict.message.contains("药妆"));
    }

    #[test]
    fn test_check_term_is_inert_outside_override_table() {
        // Known gap preserved: no escalation, no warning, plain pass.
        let verdict = classifier().classify("含药妆成分", "apparel");
        assert!(verdict.is_pass());
    }

    #[test]
    fn test_food_override_escalates_check_term() {
        let verdict = classifier().classify("祖传秘方 好吃不贵", "零食");
        assert!(verdict.is_block());
        assert!(verdict.message.contains("食品违禁"));
        assert!(verdict.message.contains("祖传秘方"));
    }

    #[test]
    fn test_warn_aggregates_all_matched_terms() {
        let verdict = classifier().classify("限时秒杀 全民疯抢", "零食");
        assert_eq!(verdict.status, VerdictStatus::Warn);
        assert!(verdict.message.contains("限时秒杀"));
        assert!(verdict.message.contains("全民疯抢"));
    }

    #[test]
    fn test_classify_is_idempotent() {
        let classifier = classifier();
        let first = classifier.classify("限时秒杀 祖传秘方", "化妆品");
        let second = classifier.classify("限时秒杀 祖传秘方", "化妆品");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_database_passes_everything() {
        let classifier = RiskClassifier::new(Arc::new(RiskDatabase::empty()));
        let verdict = classifier.classify("全网最低价 祖传秘方 限时秒杀", "零食");
        assert!(verdict.is_pass());
    }
}
