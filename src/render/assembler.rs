use crate::config::{DEFAULT_MAX_EXPORT_WIDTH, DEFAULT_VIEW_GAP_PX, DesignerConfig};
use crate::foundation::core::Canvas;
use crate::foundation::error::{DesignerError, DesignerResult};
use crate::render::blend::over;
use crate::render::raster::{Raster, resize_premul};

/// Stacks the top view above the side view for export.
///
/// Both views share one uniform scale, `min(1, max_width / max(top_w, side_w))`, so the export is
/// never wider than `max_width` and never upscaled. Each view is centered horizontally and the gap
/// between them stays `gap` pixels regardless of scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewAssembler {
    pub max_width: u32,
    pub gap: u32,
}

impl Default for ViewAssembler {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_EXPORT_WIDTH,
            gap: DEFAULT_VIEW_GAP_PX,
        }
    }
}

impl ViewAssembler {
    pub fn new(max_width: u32, gap: u32) -> DesignerResult<Self> {
        if max_width == 0 {
            return Err(DesignerError::configuration(
                "max export width must be non-zero",
            ));
        }
        Ok(Self { max_width, gap })
    }

    pub fn from_config(config: &DesignerConfig) -> DesignerResult<Self> {
        Self::new(config.max_export_width, config.view_gap_px)
    }

    /// Uniform scale factor applied to both views.
    pub fn scale_for(&self, top: Canvas, side: Canvas) -> f64 {
        let widest = top.width.max(side.width);
        (f64::from(self.max_width) / f64::from(widest)).min(1.0)
    }

    /// Output size for views of the given sizes.
    pub fn layout(&self, top: Canvas, side: Canvas) -> DesignerResult<(Canvas, Canvas, Canvas)> {
        let scale = self.scale_for(top, side);
        let top = scaled(top, scale);
        let side = scaled(side, scale);
        let height = top
            .height
            .checked_add(side.height)
            .and_then(|h| h.checked_add(self.gap))
            .ok_or_else(|| DesignerError::validation("assembled height overflow"))?;
        let out = Canvas::new(top.width.max(side.width).min(self.max_width), height)?;
        Ok((out, top, side))
    }

    #[tracing::instrument(skip(self, top, side), fields(top = ?top.size(), side = ?side.size()))]
    pub fn assemble(&self, top: &Raster, side: &Raster) -> DesignerResult<Raster> {
        let (out_size, top_size, side_size) = self.layout(top.size(), side.size())?;
        let top = rescale(top, top_size)?;
        let side = rescale(side, side_size)?;

        let mut out = Raster::transparent(out_size)?;
        blit(&mut out, &top, out_size.width.saturating_sub(top.width) / 2, 0);
        blit(
            &mut out,
            &side,
            out_size.width.saturating_sub(side.width) / 2,
            top.height + self.gap,
        );
        tracing::debug!(width = out.width, height = out.height, "assembled views");
        Ok(out)
    }
}

fn scaled(size: Canvas, scale: f64) -> Canvas {
    if scale >= 1.0 {
        return size;
    }
    let dim = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    Canvas {
        width: dim(size.width),
        height: dim(size.height),
    }
}

fn rescale(raster: &Raster, size: Canvas) -> DesignerResult<Raster> {
    if raster.size() == size {
        return Ok(raster.clone());
    }
    resize_premul(raster.size(), &raster.data, size)
}

fn blit(dst: &mut Raster, src: &Raster, x0: u32, y0: u32) {
    for y in 0..src.height {
        let dy = y0 + y;
        if dy >= dst.height {
            break;
        }
        for x in 0..src.width {
            let dx = x0 + x;
            if dx >= dst.width {
                break;
            }
            let idx = ((dy as usize) * (dst.width as usize) + (dx as usize)) * 4;
            let d = &mut dst.data[idx..idx + 4];
            let out = over([d[0], d[1], d[2], d[3]], src.pixel(x, y));
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/assembler.rs"]
mod tests;
