use std::collections::BTreeMap;

use crate::catalog::fill::{Fill, HullFinish};
use crate::catalog::models::ModelCatalog;
use crate::catalog::region::RegionCatalog;
use crate::foundation::error::{DesignerError, DesignerResult};
use crate::store::colors::RegionColorStore;

/// Flat form key carrying the hull finish.
pub const FORM_HULL_FINISH_KEY: &str = "hull-finish";
/// Flat form key carrying the model selection, when present.
pub const FORM_MODEL_KEY: &str = "kayak-model";

/// Persisted unit handed to and from storage collaborators.
///
/// ```json
/// { "modelName": "expedition", "hullFinish": "solid",
///   "regionFills": { "hull-color": "#D7D7D7", "deck-color": "#F4F4F4" } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub model_name: String,
    #[serde(default)]
    pub hull_finish: HullFinish,
    #[serde(default)]
    pub region_fills: BTreeMap<String, Fill>,
}

/// Whether a decoded design's model is still offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelStatus {
    Known,
    /// The model was retired; the caller picks a fallback.
    ModelNotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedDesign {
    pub model_name: String,
    pub model_status: ModelStatus,
    pub hull_finish: HullFinish,
    pub store: RegionColorStore,
}

/// Converts between [`Design`] documents and live store state for one region catalog.
#[derive(Clone, Debug)]
pub struct DesignCodec {
    regions: RegionCatalog,
    models: ModelCatalog,
}

impl DesignCodec {
    pub fn new(regions: RegionCatalog, models: ModelCatalog) -> Self {
        Self { regions, models }
    }

    pub fn serialize(
        &self,
        model_name: &str,
        hull_finish: &HullFinish,
        store: &RegionColorStore,
    ) -> Design {
        Design {
            model_name: model_name.to_string(),
            hull_finish: hull_finish.clone(),
            region_fills: store.get_all(),
        }
    }

    /// Rebuild store state from a design. Regions the design omits keep their catalog default;
    /// regions the catalog does not know are dropped.
    pub fn deserialize(&self, design: &Design) -> DecodedDesign {
        let mut store = RegionColorStore::new(self.regions.clone());
        store.replace_all(design.region_fills.clone());
        let model_status = if self.models.contains(&design.model_name) {
            ModelStatus::Known
        } else {
            tracing::info!(model = %design.model_name, "design references an unknown model");
            ModelStatus::ModelNotFound
        };
        DecodedDesign {
            model_name: design.model_name.clone(),
            model_status,
            hull_finish: design.hull_finish.clone(),
            store,
        }
    }

    pub fn to_json(&self, design: &Design) -> DesignerResult<String> {
        serde_json::to_string_pretty(design)
            .map_err(|e| DesignerError::serde(format!("serialize design: {e}")))
    }

    pub fn from_json(&self, s: &str) -> DesignerResult<Design> {
        serde_json::from_str(s).map_err(|e| DesignerError::serde(format!("parse design JSON: {e}")))
    }

    /// Import the flat `{ "<region>": "<fill>", "hull-finish": "..." }` shape older clients
    /// stored. A missing model key falls back to the first catalog model.
    pub fn from_form_data(&self, form: &BTreeMap<String, String>) -> DesignerResult<Design> {
        let model_name = match form.get(FORM_MODEL_KEY) {
            Some(m) => m.clone(),
            None => self
                .models
                .first()
                .ok_or_else(|| DesignerError::configuration("model catalog is empty"))?
                .to_string(),
        };
        let hull_finish = match form.get(FORM_HULL_FINISH_KEY) {
            Some(v) => HullFinish::parse(v)?,
            None => HullFinish::Solid,
        };

        let mut region_fills = BTreeMap::new();
        for (key, value) in form {
            if key == FORM_MODEL_KEY || key == FORM_HULL_FINISH_KEY {
                continue;
            }
            if !self.regions.contains(key) {
                tracing::debug!(key = %key, "ignoring unknown form field");
                continue;
            }
            let fill = Fill::parse(value)
                .map_err(|e| DesignerError::validation(format!("field '{key}': {e}")))?;
            region_fills.insert(key.clone(), fill);
        }

        Ok(Design {
            model_name,
            hull_finish,
            region_fills,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/codec.rs"]
mod tests;
