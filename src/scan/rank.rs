//! Ordering and deduplication of match records.
//!
//! A lower count means a more constrained, more trustworthy
//! interpretation, consistent with the corrector's tie-break. Category
//! priority (the `Category` variant order) breaks count ties; catalogue
//! declaration order survives through stable sorting.

use super::matcher::MatchRecord;

/// Ranks and deduplicates all records of one scan. Empty input is a
/// normal "nothing recognized" outcome and stays empty.
pub fn rank_matches(mut records: Vec<MatchRecord>) -> Vec<MatchRecord> {
    records.sort_by_key(|r| (r.count, r.category));

    let mut seen: Vec<(crate::catalogue::Category, Option<String>, u32)> = Vec::new();
    records.retain(|r| {
        let key = (r.category, r.type_code.clone(), r.count);
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });

    records
}
