use std::sync::Arc;

use crate::assets::loader::ImageLoader;
use crate::assets::resolver::AssetResolver;
use crate::catalog::fill::{Fill, HullFinish};
use crate::catalog::region::View;
use crate::config::DesignerConfig;
use crate::design::codec::{Design, DesignCodec, ModelStatus};
use crate::design::repository::{DesignId, DesignRepository};
use crate::encode::{ExportEncoder, ExportFormat};
use crate::foundation::error::DesignerResult;
use crate::preview::renderer::{ElementPatch, HullFinishUpdate, PreviewRenderer, PreviewSnapshot};
use crate::render::assembler::ViewAssembler;
use crate::render::compositor::LayerCompositor;
use crate::render::raster::Raster;
use crate::session::guard::InFlightGuard;
use crate::store::colors::RegionColorStore;

/// One designer session: the object a host integrates with.
///
/// Mutations (`set_*`, `apply_design`) take `&mut self` and return the preview patches the host
/// should apply. Exports and saves take `&self` and are admitted one at a time.
pub struct Designer {
    config: DesignerConfig,
    resolver: AssetResolver,
    store: RegionColorStore,
    hull_finish: HullFinish,
    loader: Arc<dyn ImageLoader>,
    assembler: ViewAssembler,
    encoder: ExportEncoder,
    codec: DesignCodec,
    in_flight: InFlightGuard,
}

impl Designer {
    pub fn new(config: DesignerConfig, loader: Arc<dyn ImageLoader>) -> DesignerResult<Self> {
        config.validate()?;
        let resolver = AssetResolver::with_initial_model(&config)?;
        let regions = config.region_catalog();
        let codec = DesignCodec::new(regions.clone(), config.models.clone());
        let assembler = ViewAssembler::from_config(&config)?;
        tracing::info!(
            model = resolver.active_model()?,
            regions = regions.len(),
            "designer session ready"
        );
        Ok(Self {
            store: RegionColorStore::new(regions),
            resolver,
            hull_finish: HullFinish::Solid,
            loader,
            assembler,
            encoder: ExportEncoder,
            codec,
            in_flight: InFlightGuard::new(),
            config,
        })
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn active_model(&self) -> DesignerResult<&str> {
        self.resolver.active_model()
    }

    pub fn store(&self) -> &RegionColorStore {
        &self.store
    }

    pub fn hull_finish(&self) -> &HullFinish {
        &self.hull_finish
    }

    pub fn codec(&self) -> &DesignCodec {
        &self.codec
    }

    fn preview(&self) -> PreviewRenderer<'_> {
        PreviewRenderer::new(&self.resolver)
    }

    /// Switch model. Fills are kept; every asset reference is re-derived.
    pub fn set_model(&mut self, name: &str) -> DesignerResult<Vec<ElementPatch>> {
        self.resolver.set_model(name)?;
        self.preview().apply_model(&self.store, &self.hull_finish)
    }

    /// Assign a fill. Unknown regions are ignored and produce no patches.
    pub fn set_fill(&mut self, region: &str, fill: Fill) -> DesignerResult<Vec<ElementPatch>> {
        if !self.store.set(region, fill) {
            return Ok(Vec::new());
        }
        self.preview().apply_fill(region, &self.store, &self.hull_finish)
    }

    pub fn set_hull_finish(&mut self, finish: HullFinish) -> DesignerResult<HullFinishUpdate> {
        self.hull_finish = finish;
        self.preview().apply_hull_finish(&self.store, &self.hull_finish)
    }

    pub fn reset_defaults(&mut self) -> DesignerResult<Vec<ElementPatch>> {
        self.store.reset_defaults();
        self.hull_finish = HullFinish::Solid;
        self.preview().apply_model(&self.store, &self.hull_finish)
    }

    pub fn snapshot(&self) -> DesignerResult<PreviewSnapshot> {
        self.preview().snapshot(&self.store, &self.hull_finish)
    }

    pub fn render_view(&self, view: View) -> DesignerResult<Raster> {
        LayerCompositor::new(&self.resolver, self.loader.as_ref()).render_view(
            view,
            &self.store,
            &self.hull_finish,
        )
    }

    /// Both views rendered concurrently, then assembled.
    #[tracing::instrument(skip(self))]
    pub fn render_composite(&self) -> DesignerResult<Raster> {
        let compositor = LayerCompositor::new(&self.resolver, self.loader.as_ref());
        let (top, side) = rayon::join(
            || compositor.render_view(View::Top, &self.store, &self.hull_finish),
            || compositor.render_view(View::Side, &self.store, &self.hull_finish),
        );
        self.assembler.assemble(&top?, &side?)
    }

    pub fn export(&self, format: ExportFormat) -> DesignerResult<Vec<u8>> {
        let _permit = self.in_flight.try_acquire("export")?;
        let composite = self.render_composite()?;
        self.encoder.encode(format, &composite)
    }

    pub fn export_png(&self) -> DesignerResult<Vec<u8>> {
        self.export(ExportFormat::Png)
    }

    pub fn export_pdf(&self) -> DesignerResult<Vec<u8>> {
        self.export(ExportFormat::Pdf)
    }

    /// Current state as a persistable document.
    pub fn design(&self) -> DesignerResult<Design> {
        Ok(self
            .codec
            .serialize(self.resolver.active_model()?, &self.hull_finish, &self.store))
    }

    /// Store the current design with a PNG preview of the assembled export. A render failure
    /// stores nothing.
    pub fn save_design(
        &self,
        repository: &dyn DesignRepository,
        name: &str,
    ) -> DesignerResult<DesignId> {
        let _permit = self.in_flight.try_acquire("save")?;
        let design = self.design()?;
        let preview = self.encoder.to_png(&self.render_composite()?)?;
        repository.save(name, &design, Some(preview.as_slice()))
    }

    /// Store the current design without rendering, as guest storage does.
    pub fn save_design_without_preview(
        &self,
        repository: &dyn DesignRepository,
        name: &str,
    ) -> DesignerResult<DesignId> {
        let _permit = self.in_flight.try_acquire("save")?;
        repository.save(name, &self.design()?, None)
    }

    /// Replace the session state with `design`. A retired model leaves the current model active
    /// and is reported through the returned status.
    pub fn apply_design(&mut self, design: &Design) -> DesignerResult<ModelStatus> {
        let decoded = self.codec.deserialize(design);
        if decoded.model_status == ModelStatus::Known {
            self.resolver.set_model(&decoded.model_name)?;
        }
        self.store = decoded.store;
        self.hull_finish = decoded.hull_finish;
        Ok(decoded.model_status)
    }

    pub fn load_design(
        &mut self,
        repository: &dyn DesignRepository,
        id: DesignId,
    ) -> DesignerResult<ModelStatus> {
        let stored = repository.load(id)?;
        self.apply_design(&stored.design)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/designer.rs"]
mod tests;
