use std::collections::BTreeMap;

use crate::catalog::fill::{Fill, HullFinish};
use crate::catalog::region::RegionCatalog;

/// Authoritative map from region name to its current [`Fill`].
///
/// Seeded from the catalog defaults, so every catalog region always has exactly one fill. Region
/// names outside the catalog are never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionColorStore {
    catalog: RegionCatalog,
    fills: BTreeMap<String, Fill>,
}

impl RegionColorStore {
    pub fn new(catalog: RegionCatalog) -> Self {
        let fills = defaults(&catalog);
        Self { catalog, fills }
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Current fill of `region`; `None` for names outside the catalog.
    pub fn get(&self, region: &str) -> Option<&Fill> {
        self.fills.get(region)
    }

    /// Assign a fill. Unknown regions are ignored; returns whether anything was stored.
    pub fn set(&mut self, region: &str, fill: Fill) -> bool {
        match self.fills.get_mut(region) {
            Some(slot) => {
                *slot = fill;
                true
            }
            None => {
                tracing::warn!(region, "ignoring fill for unknown region");
                false
            }
        }
    }

    pub fn get_all(&self) -> BTreeMap<String, Fill> {
        self.fills.clone()
    }

    /// Bulk assignment. Unknown regions are dropped quietly, regions absent from `fills` keep
    /// their value.
    pub fn replace_all(&mut self, fills: BTreeMap<String, Fill>) {
        for (region, fill) in fills {
            match self.fills.get_mut(&region) {
                Some(slot) => *slot = fill,
                None => tracing::debug!(region = %region, "dropping fill outside the catalog"),
            }
        }
    }

    pub fn reset_defaults(&mut self) {
        self.fills = defaults(&self.catalog);
    }

    /// Fill actually painted for `region`: a pattern hull finish replaces the finishable region's
    /// stored fill without modifying it.
    pub fn effective_fill(&self, region: &str, finish: &HullFinish) -> Option<Fill> {
        let stored = self.fills.get(region)?;
        let finishable = self.catalog.get(region).is_some_and(|r| r.finishable);
        match finish.pattern() {
            Some(pattern) if finishable => Some(Fill::Pattern(pattern.clone())),
            _ => Some(stored.clone()),
        }
    }
}

impl Default for RegionColorStore {
    fn default() -> Self {
        Self::new(RegionCatalog::default())
    }
}

fn defaults(catalog: &RegionCatalog) -> BTreeMap<String, Fill> {
    catalog
        .iter()
        .map(|r| (r.name.clone(), r.default_fill.clone()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/store/colors.rs"]
mod tests;
