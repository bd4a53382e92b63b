//! Signature validation and phantom-digit correction.
//!
//! A clean reading is an exact integer multiple of some catalogue base.
//! When OCR misreads grouping punctuation as a digit glyph, the reading
//! gains one phantom digit (`7,400` read as `74400`). The corrector first
//! tries the value as-is against every base, and only when nothing
//! divides cleanly does it retry with one digit deleted at each position.
//!
//! Several interpretations can survive; the tie-break prefers the one
//! implying the fewest objects. Four asteroids in one reading is
//! plausible, sixty-two ground clusters is not.

use serde::{Deserialize, Serialize};

use crate::catalogue::{BaseSignature, Catalogue};

use super::extract::RawCandidate;

/// Comparator applied to corrections of equal plausibility. The
/// minimal-edit rule is a heuristic, not an oracle; callers that disagree
/// can pick the plain count ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Ascending count; among equal counts prefer the repair that deletes
    /// a later digit, since that shifts the shortest suffix of the
    /// original string.
    CountThenLateEdit,
    /// Ascending count only; catalogue declaration order decides the rest.
    CountOnly,
}

/// Validation settings, normally part of
/// [`ScanConfig`](crate::scan::ScanConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Global ceiling on the inferred unit count. Each catalogue entry
    /// may impose a tighter one.
    pub sanity_ceiling: u32,
    pub tie_break: TieBreak,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            sanity_ceiling: 200,
            tie_break: TieBreak::CountThenLateEdit,
        }
    }
}

/// One candidate resolved against one catalogue entry. Only constructed
/// when `value` is an exact multiple of the entry's base and the implied
/// count passes the sanity ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction<'a> {
    /// The accepted integer value (repaired when `was_corrected`).
    pub value: u32,
    pub base: &'a BaseSignature,
    /// `value / base.base_value`, always >= 1.
    pub count: u32,
    pub was_corrected: bool,
    /// Index of the deleted digit in the raw digit string, `None` for an
    /// exact match.
    pub deleted_pos: Option<usize>,
}

/// Resolves one raw candidate against the catalogue. Returns every
/// surviving interpretation sorted by the tie-break policy (ascending
/// count first), or an empty vec when no repair rescues the reading.
pub fn resolve_candidate<'a>(
    candidate: &RawCandidate,
    catalogue: &'a Catalogue,
    config: &CorrectorConfig,
) -> Vec<Correction<'a>> {
    let mut corrections = exact_pass(candidate.value, catalogue, config, None);

    if corrections.is_empty() {
        corrections = repair_pass(candidate, catalogue, config);
        if !corrections.is_empty() {
            tracing::debug!(
                "candidate {} rescued by phantom-digit repair ({} interpretation(s))",
                candidate.value,
                corrections.len()
            );
        }
    }

    match config.tie_break {
        // Stable sorts throughout, so catalogue declaration order breaks
        // whatever the policy leaves tied.
        TieBreak::CountThenLateEdit => corrections.sort_by(|a, b| {
            a.count
                .cmp(&b.count)
                .then_with(|| b.deleted_pos.cmp(&a.deleted_pos))
        }),
        TieBreak::CountOnly => corrections.sort_by_key(|c| c.count),
    }

    corrections
}

/// Emits a correction for every catalogue entry the value divides
/// cleanly, in declaration order.
fn exact_pass<'a>(
    value: u32,
    catalogue: &'a Catalogue,
    config: &CorrectorConfig,
    deleted_pos: Option<usize>,
) -> Vec<Correction<'a>> {
    let mut out = Vec::new();
    for base in catalogue.entries() {
        if value % base.base_value != 0 {
            continue;
        }
        let count = value / base.base_value;
        if count < 1 || count > base.max_count.min(config.sanity_ceiling) {
            continue;
        }
        out.push(Correction {
            value,
            base,
            count,
            was_corrected: deleted_pos.is_some(),
            deleted_pos,
        });
    }
    out
}

/// Deletes one digit at each position of the raw digit string and re-runs
/// the exact check on every distinct repaired value.
fn repair_pass<'a>(
    candidate: &RawCandidate,
    catalogue: &'a Catalogue,
    config: &CorrectorConfig,
) -> Vec<Correction<'a>> {
    let digits = candidate.value.to_string();
    // A repair below two digits can't be a plausible reading
    if digits.len() < 3 {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut tried: Vec<u32> = Vec::new();

    // Walk deletion positions right-to-left so that when two positions
    // produce the same integer (adjacent repeated digits), the recorded
    // repair is the minimal edit.
    for pos in (0..digits.len()).rev() {
        let mut repaired = String::with_capacity(digits.len() - 1);
        repaired.push_str(&digits[..pos]);
        repaired.push_str(&digits[pos + 1..]);

        let Ok(value) = repaired.parse::<u32>() else {
            continue;
        };
        if value == 0 || tried.contains(&value) {
            continue;
        }
        tried.push(value);

        tracing::trace!(
            "repair attempt: {} -> {} (deleted digit at {})",
            digits,
            value,
            pos
        );
        out.extend(exact_pass(value, catalogue, config, Some(pos)));
    }

    out
}
