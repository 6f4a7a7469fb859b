use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::catalog::models::ModelCatalog;
use crate::catalog::region::{CatalogVersion, RegionCatalog};
use crate::foundation::error::{DesignerError, DesignerResult};

/// Default cap on the exported composite width, in pixels.
pub const DEFAULT_MAX_EXPORT_WIDTH: u32 = 1200;
/// Default vertical gap between the top and side views in the export.
pub const DEFAULT_VIEW_GAP_PX: u32 = 20;

/// Engine configuration, constructed once and handed to each component.
///
/// Loaded from JSON (all fields optional except `models`), e.g.
///
/// ```json
/// { "models_base": "assets/img/models", "patterns_base": "assets/img/patterns",
///   "models": ["expedition", "touring"], "catalog_version": "v2" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// Base location of the per-model asset directories.
    pub models_base: String,
    /// Base location of pattern (finish) images.
    pub patterns_base: String,
    /// Available models, in display order.
    pub models: ModelCatalog,
    /// Model activated on startup; defaults to the first catalog entry.
    pub default_model: Option<String>,
    pub catalog_version: CatalogVersion,
    pub max_export_width: u32,
    pub view_gap_px: u32,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            models_base: "assets/img/models/".to_string(),
            patterns_base: "assets/img/patterns/".to_string(),
            models: ModelCatalog::default(),
            default_model: None,
            catalog_version: CatalogVersion::default(),
            max_export_width: DEFAULT_MAX_EXPORT_WIDTH,
            view_gap_px: DEFAULT_VIEW_GAP_PX,
        }
    }
}

impl DesignerConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> DesignerResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| DesignerError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> DesignerResult<()> {
        if self.models_base.trim().is_empty() {
            return Err(DesignerError::configuration("models_base must be non-empty"));
        }
        if self.patterns_base.trim().is_empty() {
            return Err(DesignerError::configuration(
                "patterns_base must be non-empty",
            ));
        }
        self.models.validate()?;
        if let Some(m) = &self.default_model
            && !self.models.contains(m)
        {
            return Err(DesignerError::model_not_found(m.clone()));
        }
        if self.max_export_width == 0 {
            return Err(DesignerError::configuration(
                "max_export_width must be non-zero",
            ));
        }
        Ok(())
    }

    /// Model to activate on startup.
    pub fn initial_model(&self) -> DesignerResult<&str> {
        match &self.default_model {
            Some(m) => Ok(m),
            None => self
                .models
                .first()
                .ok_or_else(|| DesignerError::configuration("model catalog is empty")),
        }
    }

    pub fn region_catalog(&self) -> RegionCatalog {
        RegionCatalog::for_version(self.catalog_version)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
