//! Candidate extraction from raw OCR text.
//!
//! OCR output for the signature readout is noisy: stray glyphs, multiple
//! lines, and grouping punctuation that may be a comma, a period misread
//! as a comma, or an artifact. Extraction pulls every plausible integer
//! out of the text without consulting the catalogue; deciding which
//! candidate is real is the corrector's job.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Grouped numeral: `7,400` / `74,400` / `1.850`. A period is accepted as
/// a grouping mark because OCR renders commas as periods on low-contrast
/// captures.
const GROUPED_PATTERN: &str = r"\d{1,3}(?:[.,]\d{3})+";

/// Contiguous digit run; length bounds are applied from config.
const PLAIN_PATTERN: &str = r"\d+";

/// Extraction settings, normally part of
/// [`ScanConfig`](crate::scan::ScanConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Run the grouped-literal strategy before the plain digit runs.
    pub grouped_pattern: bool,
    /// Shortest digit run considered a candidate.
    pub min_run_len: usize,
    /// Longest digit run considered a candidate.
    pub max_run_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            grouped_pattern: true,
            min_run_len: 2,
            max_run_len: 6,
        }
    }
}

/// One integer pulled out of the OCR text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCandidate {
    pub value: u32,
    /// Byte span of the source literal, for diagnostics.
    pub span: Range<usize>,
    /// Came from a comma/period grouped literal.
    pub grouped: bool,
}

/// The ordered extraction pipeline. Strategies run in declaration order,
/// each contributing zero or more candidates; the union is deduplicated
/// by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Comma/period grouped literal, separators stripped.
    GroupedLiteral,
    /// Plain contiguous digit run within the length bounds.
    PlainRun,
}

/// Compiled candidate extractor.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    grouped_re: Regex,
    plain_re: Regex,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            config,
            grouped_re: Regex::new(GROUPED_PATTERN)?,
            plain_re: Regex::new(PLAIN_PATTERN)?,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts every distinct candidate from the text, ordered by
    /// position of appearance. Empty when no digit run of plausible
    /// length exists. Never fails: garbage input is simply no candidates.
    pub fn extract(&self, text: &str) -> Vec<RawCandidate> {
        let mut candidates: Vec<RawCandidate> = Vec::new();
        let mut seen_values: Vec<u32> = Vec::new();

        for strategy in self.strategy_order() {
            for candidate in self.run_strategy(strategy, text) {
                if seen_values.contains(&candidate.value) {
                    continue;
                }
                seen_values.push(candidate.value);
                candidates.push(candidate);
            }
        }

        // Report in order of appearance regardless of which strategy
        // produced the candidate. Sort is stable, so the grouped
        // interpretation keeps priority when spans collide.
        candidates.sort_by_key(|c| c.span.start);

        tracing::trace!(
            "extracted {} candidate(s) from {} byte(s) of OCR text",
            candidates.len(),
            text.len()
        );
        candidates
    }

    fn strategy_order(&self) -> Vec<Strategy> {
        let mut order = Vec::with_capacity(2);
        if self.config.grouped_pattern {
            order.push(Strategy::GroupedLiteral);
        }
        order.push(Strategy::PlainRun);
        order
    }

    fn run_strategy(&self, strategy: Strategy, text: &str) -> Vec<RawCandidate> {
        match strategy {
            Strategy::GroupedLiteral => self.grouped_candidates(text),
            Strategy::PlainRun => self.plain_candidates(text),
        }
    }

    fn grouped_candidates(&self, text: &str) -> Vec<RawCandidate> {
        let mut out = Vec::new();
        for m in self.grouped_re.find_iter(text) {
            let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
            if digits.len() < self.config.min_run_len || digits.len() > self.config.max_run_len {
                continue;
            }
            match digits.parse::<u32>() {
                Ok(value) if value > 0 => out.push(RawCandidate {
                    value,
                    span: m.range(),
                    grouped: true,
                }),
                _ => {}
            }
        }
        out
    }

    fn plain_candidates(&self, text: &str) -> Vec<RawCandidate> {
        let mut out = Vec::new();
        for m in self.plain_re.find_iter(text) {
            let run = m.as_str();
            if run.len() < self.config.min_run_len || run.len() > self.config.max_run_len {
                continue;
            }
            match run.parse::<u32>() {
                Ok(value) if value > 0 => out.push(RawCandidate {
                    value,
                    span: m.range(),
                    grouped: false,
                }),
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(ExtractorConfig::default()).unwrap()
    }

    fn values(candidates: &[RawCandidate]) -> Vec<u32> {
        candidates.iter().map(|c| c.value).collect()
    }

    #[test]
    fn test_plain_run() {
        let candidates = extractor().extract("SIGNATURE 5100");
        assert_eq!(values(&candidates), vec![5100]);
        assert!(!candidates[0].grouped);
    }

    #[test]
    fn test_comma_grouped() {
        let candidates = extractor().extract("1,850");
        assert_eq!(candidates[0].value, 1850);
        assert!(candidates[0].grouped);
        assert_eq!(candidates[0].span, 0..5);
    }

    #[test]
    fn test_period_grouped() {
        // OCR misread of the comma; the joined interpretation and the
        // trailing plain run both flow downstream
        let candidates = extractor().extract("7.400");
        assert_eq!(values(&candidates), vec![7400, 400]);
        assert!(candidates[0].grouped);
        assert!(!candidates[1].grouped);
    }

    #[test]
    fn test_comma_grouped_emits_fragment_runs_too() {
        let candidates = extractor().extract("74,400");
        assert_eq!(values(&candidates), vec![74400, 74, 400]);
    }

    #[test]
    fn test_empty_and_garbage() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("abcxyz").is_empty());
        assert!(extractor().extract("1").is_empty());
    }

    #[test]
    fn test_run_length_bounds() {
        assert!(extractor().extract("7").is_empty());
        assert!(extractor().extract("1234567").is_empty());
        assert_eq!(values(&extractor().extract("12")), vec![12]);
        assert_eq!(values(&extractor().extract("123456")), vec![123456]);
    }

    #[test]
    fn test_multiple_candidates_in_order() {
        let candidates = extractor().extract("1,850 noise 5100");
        assert_eq!(values(&candidates), vec![1850, 5100]);
    }

    #[test]
    fn test_dedup_identical_values() {
        let candidates = extractor().extract("1850 then 1850 again");
        assert_eq!(values(&candidates), vec![1850]);
        assert_eq!(candidates[0].span.start, 0);
    }

    #[test]
    fn test_dedup_across_strategies() {
        // "1,850" normalizes to the same value as the bare run
        let candidates = extractor().extract("1,850 1850");
        assert_eq!(values(&candidates), vec![1850]);
        assert!(candidates[0].grouped);
    }

    #[test]
    fn test_grouped_strategy_disabled() {
        let config = ExtractorConfig {
            grouped_pattern: false,
            ..ExtractorConfig::default()
        };
        let candidates = Extractor::new(config).unwrap().extract("7,400");
        // Only the bare runs remain; "7" is below the length floor
        assert_eq!(values(&candidates), vec![400]);
    }

    #[test]
    fn test_multiline_text() {
        let candidates = extractor().extract("SCN\n2,000\nESP");
        assert_eq!(values(&candidates), vec![2000]);
    }

    #[test]
    fn test_zero_runs_skipped() {
        // Grouping fragments like "000" are never a signature
        assert!(extractor().extract("000").is_empty());
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: ExtractorConfig = serde_json::from_str(r#"{"max_run_len": 5}"#).unwrap();
        assert!(config.grouped_pattern);
        assert_eq!(config.min_run_len, 2);
        assert_eq!(config.max_run_len, 5);
    }
}
