//! Category-conditional escalation table
//!
//! Check-tier terms are only conditionally restricted: a fixed table of
//! (category, term) pairs escalates them to a hard block. Pairs not in the
//! table leave the verdict unchanged. Both the Chinese category/term
//! spellings and their English equivalents are accepted so callers can use
//! either.

/// Check-tier terms blocked outright for cosmetics listings
const COSMETICS_BLOCKED: &[&str] = &["药妆", "治疗", "medicated", "therapeutic"];

/// Check-tier terms blocked outright for food and snack listings
const FOOD_BLOCKED: &[&str] = &[
    "增强免疫力",
    "抗癌",
    "祖传秘方",
    "boosts immunity",
    "anti-cancer",
    "ancestral secret recipe",
];

fn is_cosmetics(category: &str) -> bool {
    matches!(category, "化妆品" | "cosmetics")
}

fn is_food(category: &str) -> bool {
    matches!(category, "零食" | "食品" | "snack" | "food")
}

/// Look up the escalation for a (category, term) pair.
///
/// Returns the category-group label for the block message, or `None` when
/// the pair is not escalated.
pub fn escalation(category: &str, term: &str) -> Option<&'static str> {
    if is_cosmetics(category) && COSMETICS_BLOCKED.contains(&term) {
        return Some("化妆品");
    }
    if is_food(category) && FOOD_BLOCKED.contains(&term) {
        return Some("食品");
    }
    None
}
