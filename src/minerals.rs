//! Mineral composition lookup for ground deposits.
//!
//! Ground clusters are 100% single-mineral, so a match can only report
//! which minerals are possible for that deposit size. The actual
//! composition data lives with the pricing collaborator outside this
//! crate; the scanner only needs the lookup seam.

use std::collections::HashMap;

/// Collaborator that knows which minerals can spawn in a deposit.
/// Keyed by the catalogue type code (`"small"`, `"large"`).
pub trait MineralSource: Send + Sync {
    /// Possible minerals for the deposit type, empty when unknown.
    fn lookup_minerals(&self, type_code: &str) -> Vec<String>;
}

/// Static mineral table for the reference ground deposit sizes.
#[derive(Debug, Clone)]
pub struct StaticMinerals {
    by_type: HashMap<String, Vec<String>>,
}

impl StaticMinerals {
    pub fn new(by_type: HashMap<String, Vec<String>>) -> Self {
        Self { by_type }
    }
}

impl Default for StaticMinerals {
    fn default() -> Self {
        let gems = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        let mut by_type = HashMap::new();
        by_type.insert(
            "small".to_string(),
            gems(&["Hadanite", "Aphorite", "Dolivine"]),
        );
        by_type.insert(
            "large".to_string(),
            gems(&["Hadanite", "Aphorite", "Dolivine", "Janalite"]),
        );
        Self { by_type }
    }
}

impl MineralSource for StaticMinerals {
    fn lookup_minerals(&self, type_code: &str) -> Vec<String> {
        self.by_type.get(type_code).cloned().unwrap_or_default()
    }
}

/// No-op source for callers without composition data. Matches still
/// succeed, they just carry an empty mineral list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMinerals;

impl MineralSource for NoMinerals {
    fn lookup_minerals(&self, _type_code: &str) -> Vec<String> {
        Vec::new()
    }
}
