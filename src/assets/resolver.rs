use crate::catalog::fill::{PatternName, validate_token};
use crate::catalog::models::ModelCatalog;
use crate::catalog::region::{Region, View};
use crate::config::DesignerConfig;
use crate::foundation::error::{DesignerError, DesignerResult};

/// Maps `(model, view, region)` to asset locations.
///
/// Layout under the models base:
///
/// - `{model}/{view}_view_outline.png`
/// - `{model}/{view}_view_hardware.png`
/// - `{model}/masks/{stem}_{view}_mask.png` for each mask stem of a region present in `view`
///
/// Patterns resolve to `{patterns_base}{name}.png`. Nothing is cached: every call re-derives its
/// location from the active model.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    models_base: String,
    patterns_base: String,
    models: ModelCatalog,
    active: Option<String>,
}

impl AssetResolver {
    /// Resolver with no active model.
    pub fn new(config: &DesignerConfig) -> Self {
        Self {
            models_base: with_trailing_slash(&config.models_base),
            patterns_base: with_trailing_slash(&config.patterns_base),
            models: config.models.clone(),
            active: None,
        }
    }

    /// Resolver with the configured initial model active.
    pub fn with_initial_model(config: &DesignerConfig) -> DesignerResult<Self> {
        let mut out = Self::new(config);
        out.set_model(config.initial_model()?)?;
        Ok(out)
    }

    /// Switch the active model. Unknown names are rejected and leave the current model active.
    pub fn set_model(&mut self, name: &str) -> DesignerResult<()> {
        if !self.models.contains(name) {
            return Err(DesignerError::model_not_found(name));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    pub fn active_model(&self) -> DesignerResult<&str> {
        self.active
            .as_deref()
            .ok_or_else(|| DesignerError::configuration("no active model selected"))
    }

    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    pub fn resolve_outline(&self, view: View) -> DesignerResult<String> {
        let model = self.active_model()?;
        Ok(format!(
            "{}{model}/{}_view_outline.png",
            self.models_base,
            view.as_str()
        ))
    }

    pub fn resolve_hardware(&self, view: View) -> DesignerResult<String> {
        let model = self.active_model()?;
        Ok(format!(
            "{}{model}/{}_view_hardware.png",
            self.models_base,
            view.as_str()
        ))
    }

    /// One mask location per placement of `region` in `view`; empty when the region is not drawn
    /// in that view.
    pub fn resolve_masks(&self, view: View, region: &Region) -> DesignerResult<Vec<String>> {
        let model = self.active_model()?;
        if !region.in_view(view) {
            return Ok(Vec::new());
        }
        region
            .mask_stems
            .iter()
            .map(|stem| self.mask_location(model, view, stem))
            .collect()
    }

    /// Mask location of a single placement stem.
    pub fn resolve_mask_stem(&self, view: View, stem: &str) -> DesignerResult<String> {
        let model = self.active_model()?;
        self.mask_location(model, view, stem)
    }

    pub fn resolve_pattern(&self, name: &PatternName) -> String {
        format!("{}{name}.png", self.patterns_base)
    }

    fn mask_location(&self, model: &str, view: View, stem: &str) -> DesignerResult<String> {
        validate_token("mask stem", stem)?;
        Ok(format!(
            "{}{model}/masks/{stem}_{}_mask.png",
            self.models_base,
            view.as_str()
        ))
    }
}

fn with_trailing_slash(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    format!("{trimmed}/")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
