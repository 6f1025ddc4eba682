//! Tiered risk lexicon built from the rulebook document
//!
//! The rulebook is a semi-structured text file: CJK ordinal section headers
//! assign the tier for everything below them, and pipe-delimited table rows
//! carry the actual terms. The builder walks the file once with a tier
//! cursor, tokenizes the cells, and compiles one Aho-Corasick matcher per
//! tier for fast substring scanning.

use aho_corasick::AhoCorasick;
use listguard_core::{Error, Result, Tier};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Section-header markers and the tier each one selects.
///
/// The mapping is fixed; the builder reacts to marker presence only and does
/// not validate header ordering.
const SECTION_MARKERS: &[(&str, Tier)] = &[
    ("一、", Tier::Block),
    ("四、", Tier::Block),
    ("五、", Tier::Check),
    ("六、", Tier::Check),
    ("二、", Tier::Warn),
    ("三、", Tier::Warn),
];

/// Table cells that are column labels or scope markers, never terms
const PLACEHOLDER_CELLS: &[&str] = &["类别", "适用范围", "违规类型", "所有商品", "普通食品"];

/// Rows containing this token are table headers and contribute nothing
const HEADER_TOKEN: &str = "违禁词";

/// Separators between terms inside a cell: ideographic comma, ASCII comma,
/// full-width comma, whitespace
const CELL_SEPARATORS: &str = r"[、,，\s]+";

/// Deduplicated terms of one tier plus their compiled matcher
struct TierLexicon {
    terms: Vec<String>,
    matcher: AhoCorasick,
}

impl TierLexicon {
    fn build(terms: BTreeSet<String>) -> Result<Self> {
        let terms: Vec<String> = terms.into_iter().collect();
        // Case-sensitive on purpose: classification is exact substring
        // containment over the curated term list.
        let matcher = AhoCorasick::builder()
            .build(&terms)
            .map_err(|e| Error::rulebook(format!("failed to build term matcher: {}", e)))?;

        Ok(Self { terms, matcher })
    }

    fn find_first<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.matcher
            .find(text)
            .map(|m| self.terms[m.pattern().as_usize()].as_str())
    }

    fn find_all<'a>(&'a self, text: &str) -> Vec<&'a str> {
        // Overlapping iteration so co-occurring terms are all observed; the
        // pattern-id set dedupes repeated hits of the same term.
        let mut ids = BTreeSet::new();
        for m in self.matcher.find_overlapping_iter(text) {
            ids.insert(m.pattern().as_usize());
        }
        ids.into_iter().map(|i| self.terms[i].as_str()).collect()
    }
}

/// Immutable three-tier term database.
///
/// Built once at startup and shared read-only for the process lifetime.
/// Invariant: no tier contains a term shorter than 2 characters or a
/// table-header placeholder token.
pub struct RiskDatabase {
    block: TierLexicon,
    check: TierLexicon,
    warn: TierLexicon,
    loaded: bool,
}

impl RiskDatabase {
    /// Build the database from a rulebook file.
    ///
    /// A missing file is the non-fatal "rules unavailable" condition: the
    /// returned database is empty for all tiers, `loaded()` reports false,
    /// and classification will pass everything.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "rulebook not found, compliance checks disabled");
            return Ok(Self::empty());
        }

        let content = std::fs::read_to_string(path)?;
        let db = Self::parse(&content)?;
        info!(
            path = %path.display(),
            block = db.term_count(Tier::Block),
            check = db.term_count(Tier::Check),
            warn = db.term_count(Tier::Warn),
            "rulebook loaded"
        );
        Ok(db)
    }

    /// Parse rulebook content into a database.
    pub fn parse(content: &str) -> Result<Self> {
        let separators = Regex::new(CELL_SEPARATORS)
            .map_err(|e| Error::rulebook(format!("invalid separator pattern: {}", e)))?;

        let mut sets: [BTreeSet<String>; 3] = Default::default();
        let mut current: Option<Tier> = None;

        for line in content.lines() {
            let clean = line.trim_start_matches('#').trim();
            if clean.is_empty() {
                continue;
            }

            if let Some((_, tier)) = SECTION_MARKERS
                .iter()
                .find(|(marker, _)| clean.starts_with(marker))
            {
                current = Some(*tier);
            }

            // Data rows need a tier cursor; rows naming the header token are
            // table headers, not data.
            let Some(tier) = current else { continue };
            if !line.contains('|') || line.contains(HEADER_TOKEN) {
                continue;
            }

            let set = &mut sets[tier_index(tier)];
            for cell in line.split('|') {
                let cell = cell.trim();
                if cell.is_empty() || PLACEHOLDER_CELLS.contains(&cell) {
                    continue;
                }
                for token in separators.split(cell) {
                    if token.chars().count() > 1 {
                        set.insert(token.to_string());
                    }
                }
            }
        }

        let [block, check, warn] = sets;
        Ok(Self {
            block: TierLexicon::build(block)?,
            check: TierLexicon::build(check)?,
            warn: TierLexicon::build(warn)?,
            loaded: true,
        })
    }

    /// An empty database: every classification passes
    pub fn empty() -> Self {
        // Building a matcher over zero patterns cannot fail.
        let empty_tier = || TierLexicon::build(BTreeSet::new()).expect("empty matcher");
        Self {
            block: empty_tier(),
            check: empty_tier(),
            warn: empty_tier(),
            loaded: false,
        }
    }

    /// Whether a rulebook was actually loaded (vs. rules-unavailable)
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Number of distinct terms in a tier
    pub fn term_count(&self, tier: Tier) -> usize {
        self.lexicon(tier).terms.len()
    }

    /// Distinct terms of a tier, in matcher order
    pub fn terms(&self, tier: Tier) -> &[String] {
        &self.lexicon(tier).terms
    }

    /// First term of the tier found as a substring of `text`
    pub fn find_first<'a>(&'a self, tier: Tier, text: &str) -> Option<&'a str> {
        self.lexicon(tier).find_first(text)
    }

    /// All distinct terms of the tier found as substrings of `text`
    pub fn find_all<'a>(&'a self, tier: Tier, text: &str) -> Vec<&'a str> {
        self.lexicon(tier).find_all(text)
    }

    fn lexicon(&self, tier: Tier) -> &TierLexicon {
        match tier {
            Tier::Block => &self.block,
            Tier::Check => &self.check,
            Tier::Warn => &self.warn,
        }
    }
}

fn tier_index(tier: Tier) -> usize {
    match tier {
        Tier::Block => 0,
        Tier::Check => 1,
        Tier::Warn => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_RULEBOOK: &str = "\
# 一、法律红线类\n\
| 类别 | 违禁词 | 适用范围 |\n\
| 所有商品 | 国家级、最高级 最低价 | 所有商品 |\n\
# 五、条件限制类\n\
| 所有商品 | 药妆、治疗 祖传秘方，增强免疫力 抗癌 | 普通食品 |\n\
# 二、营销夸大类\n\
| 所有商品 | 限时秒杀、全民疯抢 | 所有商品 |\n";

    #[test]
    fn test_parse_assigns_terms_to_tiers() {
        let db = RiskDatabase::parse(SAMPLE_RULEBOOK).unwrap();

        assert_eq!(db.term_count(Tier::Block), 3);
        assert_eq!(db.term_count(Tier::Check), 5);
        assert_eq!(db.term_count(Tier::Warn), 2);
        assert!(db.terms(Tier::Block).iter().any(|t| t == "最低价"));
        assert!(db.terms(Tier::Check).iter().any(|t| t == "祖传秘方"));
        assert!(db.terms(Tier::Warn).iter().any(|t| t == "限时秒杀"));
    }

    #[test]
    fn test_header_rows_and_placeholders_are_filtered() {
        let db = RiskDatabase::parse(SAMPLE_RULEBOOK).unwrap();

        for tier in Tier::PRIORITY {
            for term in db.terms(tier) {
                assert_ne!(term, "违禁词");
                assert_ne!(term, "类别");
                assert_ne!(term, "所有商品");
            }
        }
    }

    #[test]
    fn test_short_tokens_are_dropped() {
        let doc = "一、红线\n| 所有商品 | 好 特价 |\n";
        let db = RiskDatabase::parse(doc).unwrap();

        assert_eq!(db.terms(Tier::Block), &["特价".to_string()]);
    }

    #[test]
    fn test_terms_are_deduplicated() {
        let doc = "一、红线\n| 所有商品 | 最低价、最低价 |\n| 所有商品 | 最低价 |\n";
        let db = RiskDatabase::parse(doc).unwrap();

        assert_eq!(db.term_count(Tier::Block), 1);
    }

    #[test]
    fn test_rows_before_any_header_contribute_nothing() {
        let doc = "| 所有商品 | 最低价 |\n一、红线\n";
        let db = RiskDatabase::parse(doc).unwrap();

        assert_eq!(db.term_count(Tier::Block), 0);
    }

    #[test]
    fn test_empty_content_yields_empty_database() {
        let db = RiskDatabase::parse("").unwrap();

        for tier in Tier::PRIORITY {
            assert_eq!(db.term_count(tier), 0);
        }
    }

    #[test]
    fn test_missing_file_yields_empty_database() {
        let db = RiskDatabase::from_file("/nonexistent/rulebook.md").unwrap();

        assert!(!db.loaded());
        for tier in Tier::PRIORITY {
            assert_eq!(db.term_count(tier), 0);
        }
    }

    #[test]
    fn test_from_file_reads_rulebook() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_RULEBOOK.as_bytes()).unwrap();

        let db = RiskDatabase::from_file(file.path()).unwrap();
        assert!(db.loaded());
        assert_eq!(db.term_count(Tier::Block), 3);
    }

    #[test]
    fn test_find_all_reports_every_cooccurring_term() {
        let db = RiskDatabase::parse(SAMPLE_RULEBOOK).unwrap();

        let found = db.find_all(Tier::Warn, "限时秒杀进行中，全民疯抢");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&"限时秒杀"));
        assert!(found.contains(&"全民疯抢"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let doc = "一、红线\n| 所有商品 | BestEver |\n";
        let db = RiskDatabase::parse(doc).unwrap();

        assert!(db.find_first(Tier::Block, "the BestEver deal").is_some());
        assert!(db.find_first(Tier::Block, "the bestever deal").is_none());
    }
}
