//! sigscan — signature resolution engine.
//!
//! Turns a noisy OCR reading of a HUD signature value into a ranked list
//! of object interpretations: which asteroid, deposit, ground cluster, or
//! salvage hull the number belongs to, and how many of them are stacked
//! into the reading.
//!
//! The surrounding application (screenshot watching, HUD region
//! detection, OCR itself, overlay rendering, price lookups) lives
//! elsewhere; this crate starts at the raw OCR string.
//!
//! ```
//! use sigscan::{Catalogue, ScanConfig, SignatureScanner};
//!
//! let scanner = SignatureScanner::new(Catalogue::builtin(), ScanConfig::default())?;
//! let matches = scanner.resolve_signature("7,400");
//! assert_eq!(matches[0].label, "M-type Asteroid (x4)");
//! # anyhow::Ok(())
//! ```

pub mod catalogue;
pub mod minerals;
pub mod scan;

pub use catalogue::{BaseSignature, Catalogue, Category, MiningMethod};
pub use minerals::{MineralSource, NoMinerals, StaticMinerals};
pub use scan::{
    CorrectorConfig, ExtractorConfig, MatchRecord, RawCandidate, ScanConfig, SignatureScanner,
    TieBreak,
};
