//! Assembly of display-ready match records from validated corrections.

use serde::{Deserialize, Serialize};

use crate::catalogue::{Category, MiningMethod};
use crate::minerals::MineralSource;

use super::correct::Correction;

/// One resolved interpretation of a scanned signature, ready for the
/// caller to display. Created per scan, never mutated, not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub category: Category,
    /// `None` for salvage.
    pub type_code: Option<String>,
    /// Display name, annotated with the multiplicity when `count > 1`
    /// (`"C-type Asteroid (x4)"`, `"Salvage (3 panels)"`).
    pub label: String,
    /// Inferred number of same-type objects behind the reading.
    pub count: u32,
    /// The accepted signature value (post-repair when `was_corrected`).
    pub signature: u32,
    pub base_value: u32,
    pub method: MiningMethod,
    pub was_corrected: bool,
    /// Possible minerals for ground deposits; empty otherwise or when the
    /// mineral source doesn't know the type.
    pub minerals: Vec<String>,
}

/// Folds one candidate's corrections into a record per distinct
/// `(category, type_code)`. Corrections arrive sorted by ascending count,
/// so the first correction seen for a pair is its most plausible one.
pub fn build_matches(
    corrections: &[Correction<'_>],
    minerals: &dyn MineralSource,
) -> Vec<MatchRecord> {
    let mut records: Vec<MatchRecord> = Vec::new();

    for correction in corrections {
        let base = correction.base;
        let already_covered = records
            .iter()
            .any(|r| r.category == base.category && r.type_code == base.type_code);
        if already_covered {
            continue;
        }

        let possible_minerals = match base.category {
            Category::GroundDepositSmall | Category::GroundDepositLarge => base
                .type_code
                .as_deref()
                .map(|code| minerals.lookup_minerals(code))
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        records.push(MatchRecord {
            category: base.category,
            type_code: base.type_code.clone(),
            label: label_for(correction),
            count: correction.count,
            signature: correction.value,
            base_value: base.base_value,
            method: base.method,
            was_corrected: correction.was_corrected,
            minerals: possible_minerals,
        });
    }

    records
}

fn label_for(correction: &Correction<'_>) -> String {
    let base = correction.base;
    match base.category {
        Category::Salvage => {
            if correction.count == 1 {
                "Salvage (1 panel)".to_string()
            } else {
                format!("Salvage ({} panels)", correction.count)
            }
        }
        _ if correction.count > 1 => format!("{} (x{})", base.display_name, correction.count),
        _ => base.display_name.clone(),
    }
}
