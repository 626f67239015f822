//! Equipment-type classification
//!
//! A declared type (from the optional `type` CSV column) always wins.
//! Without one, a keyword table over the equipment name decides; equipment
//! matching nothing falls into the caller's "Unknown" bucket.

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::TYPE_KEYWORD_PATTERNS;

fn keyword_table() -> &'static [(Regex, &'static str)] {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        TYPE_KEYWORD_PATTERNS
            .iter()
            .map(|(pattern, label)| {
                let regex = Regex::new(pattern)
                    .unwrap_or_else(|e| panic!("invalid classifier pattern '{}': {}", pattern, e));
                (regex, *label)
            })
            .collect()
    })
}

/// Classify one equipment entry into a type label.
///
/// Returns `None` when neither a declared type nor the naming heuristic
/// yields a category.
pub fn classify_equipment(name: &str, declared_type: &str) -> Option<String> {
    let declared = declared_type.trim();
    if !declared.is_empty() {
        return Some(declared.to_string());
    }

    keyword_table()
        .iter()
        .find(|(regex, _)| regex.is_match(name))
        .map(|(_, label)| (*label).to_string())
}
