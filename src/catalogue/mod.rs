//! Signature reference data.
//!
//! Every minable or salvageable object emits a HUD signature that is an
//! exact integer multiple of a per-type base value. The catalogue is the
//! table of those base values with their category and mining-method
//! metadata. It is loaded once at startup and read-only afterwards, so it
//! can be shared across concurrent scans without locking.
//!
//! Base values are not unique across categories; collisions are expected
//! and surface as ambiguous matches downstream.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Object category. The variant order is the ranking priority order used
/// when two matches have the same count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SpaceDeposit,
    SurfaceDeposit,
    GroundDepositSmall,
    GroundDepositLarge,
    Salvage,
}

/// How the object is harvested. Informational only; carried through to
/// match records for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiningMethod {
    ShipMining,
    RocMining,
    FpsMining,
    Salvage,
}

impl MiningMethod {
    /// Human-readable label for overlays and logs.
    pub fn label(&self) -> &'static str {
        match self {
            MiningMethod::ShipMining => "Ship mining",
            MiningMethod::RocMining => "ROC/Vehicle mining",
            MiningMethod::FpsMining => "FPS/Hand mining",
            MiningMethod::Salvage => "Salvage",
        }
    }
}

/// Fallback count ceiling for entries that don't declare their own.
const DEFAULT_MAX_COUNT: u32 = 200;

fn default_max_count() -> u32 {
    DEFAULT_MAX_COUNT
}

/// One immutable catalogue entry: the signature contributed by a single
/// unit of this object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSignature {
    pub category: Category,
    /// Short type identifier (`"C"`, `"Shale"`, ...). `None` for salvage.
    pub type_code: Option<String>,
    pub display_name: String,
    /// Signature of one unit. Always positive.
    pub base_value: u32,
    pub method: MiningMethod,
    /// Largest plausible unit count for this entry. Readings implying a
    /// higher count are treated as noise, not matches.
    #[serde(default = "default_max_count")]
    pub max_count: u32,
}

/// On-disk catalogue file shape.
#[derive(Debug, Deserialize)]
struct CatalogueFile {
    #[allow(dead_code)]
    version: Option<String>,
    entries: Vec<BaseSignature>,
}

/// The read-only set of known base signatures.
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<BaseSignature>,
}

impl Catalogue {
    /// Builds a catalogue from entries, validating each one. Malformed
    /// reference data is fatal: every downstream check depends on it.
    pub fn from_entries(entries: Vec<BaseSignature>) -> Result<Self> {
        if entries.is_empty() {
            bail!("signature catalogue is empty");
        }
        for (idx, entry) in entries.iter().enumerate() {
            if entry.base_value == 0 {
                bail!(
                    "catalogue entry {} ('{}') has base_value 0",
                    idx,
                    entry.display_name
                );
            }
            if entry.max_count == 0 {
                bail!(
                    "catalogue entry {} ('{}') has max_count 0",
                    idx,
                    entry.display_name
                );
            }
            if entry.display_name.trim().is_empty() {
                bail!("catalogue entry {} has an empty display name", idx);
            }
            match (&entry.category, &entry.type_code) {
                (Category::Salvage, Some(code)) => {
                    bail!(
                        "salvage entry {} ('{}') must not carry a type code ('{}')",
                        idx,
                        entry.display_name,
                        code
                    );
                }
                (Category::Salvage, None) => {}
                (_, None) => {
                    bail!(
                        "catalogue entry {} ('{}') is missing its type code",
                        idx,
                        entry.display_name
                    );
                }
                (_, Some(_)) => {}
            }
        }
        Ok(Self { entries })
    }

    /// Parses a catalogue from its JSON file format.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogueFile =
            serde_json::from_str(json).context("Failed to parse signature catalogue JSON")?;
        Self::from_entries(file.entries)
    }

    /// Loads a catalogue from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalogue file {}", path.display()))?;
        let catalogue = Self::from_json(&content)
            .with_context(|| format!("Invalid catalogue file {}", path.display()))?;
        tracing::info!(
            "Loaded {} signature entries from {}",
            catalogue.entries.len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// The built-in reference table. Space and surface deposit values are
    /// per-type; ground clusters share one base per deposit size; salvage
    /// is a fixed signature per hull panel.
    pub fn builtin() -> Self {
        fn entry(
            category: Category,
            type_code: Option<&str>,
            display_name: &str,
            base_value: u32,
            method: MiningMethod,
            max_count: u32,
        ) -> BaseSignature {
            BaseSignature {
                category,
                type_code: type_code.map(str::to_string),
                display_name: display_name.to_string(),
                base_value,
                method,
                max_count,
            }
        }
        let space = |code, name, base| {
            entry(
                Category::SpaceDeposit,
                Some(code),
                name,
                base,
                MiningMethod::ShipMining,
                100,
            )
        };
        let surface = |code, name, base| {
            entry(
                Category::SurfaceDeposit,
                Some(code),
                name,
                base,
                MiningMethod::ShipMining,
                100,
            )
        };

        Self {
            entries: vec![
                space("C", "C-type Asteroid", 1700),
                space("E", "E-type Asteroid", 1900),
                space("I", "I-type Asteroid", 1660),
                space("M", "M-type Asteroid", 1850),
                space("P", "P-type Asteroid", 1750),
                space("Q", "Q-type Asteroid", 1870),
                space("S", "S-type Asteroid", 1720),
                surface("Shale", "Shale Deposit", 1730),
                surface("Felsic", "Felsic Deposit", 1770),
                surface("Obsidian", "Obsidian Deposit", 1790),
                surface("Atacamite", "Atacamite Deposit", 1800),
                surface("Quartzite", "Quartzite Deposit", 1820),
                surface("Gneiss", "Gneiss Deposit", 1840),
                surface("Granite", "Granite Deposit", 1920),
                surface("Igneous", "Igneous Deposit", 1950),
                entry(
                    Category::GroundDepositSmall,
                    Some("small"),
                    "Small Ground Deposit",
                    120,
                    MiningMethod::FpsMining,
                    50,
                ),
                entry(
                    Category::GroundDepositLarge,
                    Some("large"),
                    "Large Ground Deposit",
                    620,
                    MiningMethod::RocMining,
                    50,
                ),
                entry(
                    Category::Salvage,
                    None,
                    "Salvage Panel",
                    2000,
                    MiningMethod::Salvage,
                    100,
                ),
            ],
        }
    }

    /// Entries in declaration order. Declaration order breaks ranking ties.
    pub fn entries(&self) -> &[BaseSignature] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
