use std::collections::HashSet;

use crate::catalog::fill::{Fill, validate_token};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{DesignerError, DesignerResult};

/// One of the two fixed camera angles.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Top,
    Side,
}

impl View {
    /// Both views in export order (top above side).
    pub const ALL: [Self; 2] = [Self::Top, Self::Side];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Side => "side",
        }
    }
}

/// Which views a region appears in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSet {
    Top,
    Side,
    Both,
}

impl ViewSet {
    pub fn contains(self, view: View) -> bool {
        matches!(
            (self, view),
            (Self::Both, _) | (Self::Top, View::Top) | (Self::Side, View::Side)
        )
    }
}

/// Stacking bucket of a region. Variant order is paint order: base, then accent, then line.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RegionCategory {
    /// Body panels: hull, deck, seat, cockpit rim, logos.
    Base,
    /// Front/rear accents.
    Accent,
    /// Pin-stripes, seam tape, trim.
    Line,
}

/// Versions of the shipped region catalog.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVersion {
    /// First generation, without deck seam tape.
    V1,
    /// Adds `deck-seam-tape-color` to the side view.
    #[default]
    V2,
}

/// A named, paintable area of the kayak.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub name: String,
    pub views: ViewSet,
    pub category: RegionCategory,
    /// One mask stem per physical layer placement; all placements share the region's fill.
    pub mask_stems: Vec<String>,
    pub default_fill: Fill,
    /// Region whose solid fill can be overridden by a hull finish pattern.
    #[serde(default)]
    pub finishable: bool,
}

impl Region {
    pub fn new(
        name: &str,
        views: ViewSet,
        category: RegionCategory,
        mask_stems: &[&str],
        default_color: Rgba8,
    ) -> Self {
        Self {
            name: name.to_string(),
            views,
            category,
            mask_stems: mask_stems.iter().map(|s| s.to_string()).collect(),
            default_fill: Fill::Color(default_color),
            finishable: false,
        }
    }

    fn finishable(mut self) -> Self {
        self.finishable = true;
        self
    }

    pub fn in_view(&self, view: View) -> bool {
        self.views.contains(view)
    }
}

/// One physical layer slot of a view: a region paired with one of its mask placements.
#[derive(Clone, Copy, Debug)]
pub struct LayerSlot<'a> {
    pub region: &'a Region,
    pub mask_stem: &'a str,
    /// Index into `region.mask_stems`.
    pub placement: usize,
}

/// Fixed, versioned list of regions. Iteration order is the catalog's insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionCatalog {
    version: CatalogVersion,
    regions: Vec<Region>,
}

const JET_BLACK: Rgba8 = Rgba8::opaque(0x0A, 0x0A, 0x0A);

impl RegionCatalog {
    pub fn for_version(version: CatalogVersion) -> Self {
        let mut regions = vec![
            Region::new(
                "hull-color",
                ViewSet::Side,
                RegionCategory::Base,
                &["hull"],
                Rgba8::opaque(0xD7, 0xD7, 0xD7),
            )
            .finishable(),
            Region::new(
                "deck-color",
                ViewSet::Both,
                RegionCategory::Base,
                &["deck"],
                Rgba8::opaque(0xF4, 0xF4, 0xF4),
            ),
            Region::new(
                "cockpit-rim-color",
                ViewSet::Both,
                RegionCategory::Base,
                &["cockpit_rim"],
                JET_BLACK,
            ),
            Region::new(
                "seat-color",
                ViewSet::Top,
                RegionCategory::Base,
                &["seat"],
                JET_BLACK,
            ),
            Region::new(
                "logo-color",
                ViewSet::Both,
                RegionCategory::Base,
                &["logos"],
                JET_BLACK,
            ),
            Region::new(
                "accent-front-color",
                ViewSet::Both,
                RegionCategory::Accent,
                &["accent_front"],
                Rgba8::opaque(0xE8, 0x77, 0x00),
            ),
            Region::new(
                "accent-rear-color",
                ViewSet::Both,
                RegionCategory::Accent,
                &["accent_rear"],
                Rgba8::opaque(0x00, 0x50, 0x8C),
            ),
            Region::new(
                "lines-color",
                ViewSet::Both,
                RegionCategory::Line,
                &["lines"],
                Rgba8::opaque(0x59, 0x9F, 0x45),
            ),
        ];
        if version == CatalogVersion::V2 {
            regions.push(Region::new(
                "deck-seam-tape-color",
                ViewSet::Side,
                RegionCategory::Line,
                &["seam_tape"],
                JET_BLACK,
            ));
        }
        Self { version, regions }
    }

    /// Build a custom catalog, e.g. for a new model generation.
    pub fn from_regions(version: CatalogVersion, regions: Vec<Region>) -> DesignerResult<Self> {
        let mut seen = HashSet::new();
        let mut finishable = 0usize;
        for r in &regions {
            if r.name.trim().is_empty() {
                return Err(DesignerError::validation("region name must be non-empty"));
            }
            if !seen.insert(r.name.as_str()) {
                return Err(DesignerError::validation(format!(
                    "duplicate region '{}'",
                    r.name
                )));
            }
            for stem in &r.mask_stems {
                validate_token("mask stem", stem)?;
            }
            if r.finishable {
                finishable += 1;
            }
        }
        if finishable > 1 {
            return Err(DesignerError::validation(
                "at most one region may carry a hull finish",
            ));
        }
        Ok(Self { version, regions })
    }

    pub fn version(&self) -> CatalogVersion {
        self.version
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region that follows the hull finish, if this catalog has one.
    pub fn hull_region(&self) -> Option<&Region> {
        self.regions.iter().find(|r| r.finishable)
    }

    /// Layer slots of `view` in paint order: base, accent, line buckets; catalog order then
    /// placement order within a bucket.
    pub fn layers_for(&self, view: View) -> Vec<LayerSlot<'_>> {
        let mut slots: Vec<LayerSlot<'_>> = self
            .regions
            .iter()
            .filter(|r| r.in_view(view))
            .flat_map(|region| {
                region
                    .mask_stems
                    .iter()
                    .enumerate()
                    .map(move |(placement, stem)| LayerSlot {
                        region,
                        mask_stem: stem.as_str(),
                        placement,
                    })
            })
            .collect();
        // Stable: keeps insertion order inside each bucket.
        slots.sort_by_key(|s| s.region.category);
        slots
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::for_version(CatalogVersion::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/region.rs"]
mod tests;
