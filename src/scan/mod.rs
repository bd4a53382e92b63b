//! The scan pipeline: OCR text in, ranked match records out.
//!
//! Stages, in order:
//! 1. [`extract`] — pull integer candidates out of the noisy text
//! 2. [`correct`] — validate against the catalogue, repair phantom digits
//! 3. [`matcher`] — build one display record per category/type
//! 4. [`rank`] — order by plausibility and deduplicate
//!
//! Every stage is a pure transformation; a scan borrows the scanner
//! immutably, so one scanner can serve concurrent callers.

pub mod correct;
pub mod extract;
pub mod matcher;
pub mod rank;

pub use correct::{CorrectorConfig, TieBreak};
pub use extract::{ExtractorConfig, RawCandidate};
pub use matcher::MatchRecord;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalogue::Catalogue;
use crate::minerals::{MineralSource, StaticMinerals};

use extract::Extractor;

/// All pipeline settings. Loadable from JSON; missing fields fall back to
/// the defaults, so a config file only needs the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub extractor: ExtractorConfig,
    pub corrector: CorrectorConfig,
}

impl ScanConfig {
    /// Load config from file, or return defaults if the file is missing
    /// or unreadable.
    pub fn load(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded scan config from {}", config_path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse scan config: {}. Using defaults.", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read scan config: {}. Using defaults.", e);
                }
            }
        }
        Self::default()
    }
}

/// Resolves noisy OCR signature readings against a read-only catalogue.
pub struct SignatureScanner {
    catalogue: Catalogue,
    extractor: Extractor,
    corrector: CorrectorConfig,
    minerals: Box<dyn MineralSource>,
}

impl SignatureScanner {
    pub fn new(catalogue: Catalogue, config: ScanConfig) -> Result<Self> {
        Ok(Self {
            catalogue,
            extractor: Extractor::new(config.extractor)?,
            corrector: config.corrector,
            minerals: Box::new(StaticMinerals::default()),
        })
    }

    /// Swaps the mineral-composition collaborator.
    pub fn with_minerals(mut self, minerals: Box<dyn MineralSource>) -> Self {
        self.minerals = minerals;
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Resolves one raw OCR text to its ranked match records.
    ///
    /// An empty result means "no signature recognized" and is a normal
    /// outcome, not a failure: nothing numeric in the text, or no
    /// candidate divides any base even after phantom-digit repair.
    pub fn resolve_signature(&self, raw_ocr_text: &str) -> Vec<MatchRecord> {
        let candidates = self.extractor.extract(raw_ocr_text);
        if candidates.is_empty() {
            tracing::debug!("no candidates in OCR text ({} bytes)", raw_ocr_text.len());
            return Vec::new();
        }

        let mut records = Vec::new();
        for candidate in &candidates {
            let corrections = correct::resolve_candidate(candidate, &self.catalogue, &self.corrector);
            if corrections.is_empty() {
                tracing::debug!(
                    "candidate {} (span {}..{}) matches no base signature",
                    candidate.value,
                    candidate.span.start,
                    candidate.span.end
                );
                continue;
            }
            records.extend(matcher::build_matches(&corrections, self.minerals.as_ref()));
        }

        rank::rank_matches(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Category;
    use crate::minerals::NoMinerals;

    fn scanner() -> SignatureScanner {
        SignatureScanner::new(Catalogue::builtin(), ScanConfig::default()).unwrap()
    }

    #[test]
    fn test_single_asteroid_literal() {
        let matches = scanner().resolve_signature("1,850");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.label, "M-type Asteroid");
        assert_eq!(m.count, 1);
        assert_eq!(m.base_value, 1850);
        assert!(!m.was_corrected);
    }

    #[test]
    fn test_asteroid_cluster_literal() {
        let matches = scanner().resolve_signature("5100");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].label, "C-type Asteroid (x3)");
        assert_eq!(matches[0].count, 3);
    }

    #[test]
    fn test_exact_grouped_literal() {
        // 7480 = 4 x 1870 exactly; resolved without repair
        let matches = scanner().resolve_signature("7,480");
        let q_type = matches
            .iter()
            .find(|m| m.type_code.as_deref() == Some("Q"))
            .unwrap();
        assert_eq!(q_type.count, 4);
        assert!(!q_type.was_corrected);
    }

    #[test]
    fn test_phantom_digit_end_to_end() {
        // The comma of 7,400 misread as an extra digit
        for noisy in ["74400", "70400", "74004"] {
            let matches = scanner().resolve_signature(noisy);
            let m_type = matches
                .iter()
                .find(|m| m.base_value == 1850)
                .unwrap_or_else(|| panic!("no M-type match for {noisy}"));
            assert_eq!(m_type.count, 4, "input {noisy}");
            assert_eq!(m_type.signature, 7400, "input {noisy}");
            assert!(m_type.was_corrected, "input {noisy}");
            assert!(
                !matches.iter().any(|m| m.base_value == 120 && m.count == 62),
                "input {noisy} resolved to the implausible 62-cluster reading"
            );
        }
    }

    #[test]
    fn test_empty_and_garbage_inputs() {
        for text in ["", "abcxyz", "1", "SCN ESP CRLD"] {
            assert!(scanner().resolve_signature(text).is_empty(), "input {text:?}");
        }
    }

    #[test]
    fn test_unresolvable_candidate_dropped_silently() {
        // 997 is prime-ish noise: extracted, but divides nothing
        assert!(scanner().resolve_signature("997").is_empty());
    }

    #[test]
    fn test_idempotence() {
        let scanner = scanner();
        let text = "SIGNATURE 74,400 and 1,850";
        let first = scanner.resolve_signature(text);
        let second = scanner.resolve_signature(text);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_literal_deduplicated() {
        let matches = scanner().resolve_signature("1,850 ... 1,850");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_multiple_candidates_ranked_together() {
        let matches = scanner().resolve_signature("5100 1,850");
        assert!(matches.len() >= 2);
        // count 1 (M-type) ranks ahead of count 3 (C-type)
        assert_eq!(matches[0].base_value, 1850);
        assert_eq!(matches[1].base_value, 1700);
    }

    #[test]
    fn test_salvage_scan() {
        let matches = scanner().resolve_signature("4,000");
        let salvage = matches
            .iter()
            .find(|m| m.category == Category::Salvage)
            .unwrap();
        assert_eq!(salvage.label, "Salvage (2 panels)");
        assert_eq!(salvage.count, 2);
    }

    #[test]
    fn test_ground_deposit_scan_carries_minerals() {
        let matches = scanner().resolve_signature("620");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.category, Category::GroundDepositLarge);
        assert_eq!(m.count, 1);
        assert!(m.minerals.contains(&"Janalite".to_string()));
    }

    #[test]
    fn test_mineral_source_swap() {
        let scanner = scanner().with_minerals(Box::new(NoMinerals));
        let matches = scanner.resolve_signature("620");
        assert!(matches[0].minerals.is_empty());
    }

    #[test]
    fn test_count_sweep_over_builtin_catalogue() {
        let scanner = scanner();
        for entry in scanner.catalogue().entries().to_vec() {
            for k in [1u32, 2, 7, 25, 50] {
                let text = (k * entry.base_value).to_string();
                let matches = scanner.resolve_signature(&text);
                assert!(
                    matches
                        .iter()
                        .any(|m| m.base_value == entry.base_value
                            && m.category == entry.category
                            && m.count == k),
                    "{} x {} ({}) not matched",
                    k,
                    entry.base_value,
                    entry.display_name
                );
            }
        }
    }

    #[test]
    fn test_config_load_missing_file_defaults() {
        let config = ScanConfig::load(Path::new("/nonexistent/scan_config.json"));
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn test_config_partial_json_overrides() {
        let config: ScanConfig =
            serde_json::from_str(r#"{"corrector": {"sanity_ceiling": 40}}"#).unwrap();
        assert_eq!(config.corrector.sanity_ceiling, 40);
        assert_eq!(config.corrector.tie_break, TieBreak::CountThenLateEdit);
        assert!(config.extractor.grouped_pattern);
    }
}
