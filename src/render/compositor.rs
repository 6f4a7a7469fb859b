use crate::assets::decode::PreparedImage;
use crate::assets::loader::ImageLoader;
use crate::assets::resolver::AssetResolver;
use crate::catalog::fill::{Fill, HullFinish};
use crate::catalog::region::View;
use crate::foundation::core::Canvas;
use crate::foundation::error::DesignerResult;
use crate::render::blend::{draw_image_over, mask_in_place, over_in_place};
use crate::render::raster::{Raster, resize_premul};
use crate::store::colors::RegionColorStore;

/// Flattens one view: outline, masked region layers in bucket order, hardware on top.
///
/// Image loads happen strictly in draw order and any failure aborts the whole view, so a returned
/// raster is always complete.
pub struct LayerCompositor<'a> {
    resolver: &'a AssetResolver,
    loader: &'a dyn ImageLoader,
}

impl<'a> LayerCompositor<'a> {
    pub fn new(resolver: &'a AssetResolver, loader: &'a dyn ImageLoader) -> Self {
        Self { resolver, loader }
    }

    #[tracing::instrument(skip(self, store))]
    pub fn render_view(
        &self,
        view: View,
        store: &RegionColorStore,
        finish: &HullFinish,
    ) -> DesignerResult<Raster> {
        let outline = self.loader.load(&self.resolver.resolve_outline(view)?)?;
        let mut canvas = Raster::from_image(&outline)?;
        let size = canvas.size();

        for slot in store.catalog().layers_for(view) {
            let Some(fill) = store.effective_fill(&slot.region.name, finish) else {
                continue;
            };
            if !fill.is_visible() {
                tracing::debug!(region = %slot.region.name, "skipping empty fill");
                continue;
            }

            let mask = self
                .loader
                .load(&self.resolver.resolve_mask_stem(view, slot.mask_stem)?)?;
            let mut layer = self.paint(&fill, size)?;
            mask_in_place(&mut layer, &mask);
            over_in_place(&mut canvas, &layer)?;
            tracing::debug!(
                region = %slot.region.name,
                placement = slot.placement,
                category = ?slot.region.category,
                "drew layer"
            );
        }

        let hardware = self.loader.load(&self.resolver.resolve_hardware(view)?)?;
        draw_image_over(&mut canvas, &hardware);
        Ok(canvas)
    }

    /// Full-canvas layer of `fill` before masking.
    fn paint(&self, fill: &Fill, size: Canvas) -> DesignerResult<Raster> {
        match fill {
            Fill::None => Raster::transparent(size),
            Fill::Color(c) => Raster::solid(size, c.to_premul()),
            Fill::Pattern(name) => {
                let pattern = self.loader.load(&self.resolver.resolve_pattern(name))?;
                stretch(&pattern, size)
            }
        }
    }
}

/// Scale `image` to exactly `size`.
pub(crate) fn stretch(image: &PreparedImage, size: Canvas) -> DesignerResult<Raster> {
    if image.size() == size {
        return Raster::from_image(image);
    }
    resize_premul(image.size(), &image.rgba8_premul, size)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
