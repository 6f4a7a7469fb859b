use crate::assets::decode::PreparedImage;
use crate::foundation::error::{DesignerError, DesignerResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::raster::Raster;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Porter-Duff destination-in: keep `dst` scaled by the mask's alpha.
pub fn destination_in(dst: PremulRgba8, mask_alpha: u8) -> PremulRgba8 {
    match mask_alpha {
        0 => [0; 4],
        255 => dst,
        m => {
            let m = u16::from(m);
            [
                mul_div255_u8(u16::from(dst[0]), m),
                mul_div255_u8(u16::from(dst[1]), m),
                mul_div255_u8(u16::from(dst[2]), m),
                mul_div255_u8(u16::from(dst[3]), m),
            ]
        }
    }
}

/// Composite `src` over `dst`; both must share dimensions.
pub fn over_in_place(dst: &mut Raster, src: &Raster) -> DesignerResult<()> {
    if dst.size() != src.size() {
        return Err(DesignerError::validation(
            "over_in_place expects equally sized rasters",
        ));
    }
    for (d, s) in dst.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `image` over `dst` at the origin, at its natural size; overflow is clipped.
pub fn draw_image_over(dst: &mut Raster, image: &PreparedImage) {
    let w = dst.width.min(image.width);
    let h = dst.height.min(image.height);
    for y in 0..h {
        for x in 0..w {
            let idx = ((y as usize) * (dst.width as usize) + (x as usize)) * 4;
            let d = &mut dst.data[idx..idx + 4];
            let out = over([d[0], d[1], d[2], d[3]], image.pixel(x, y));
            d.copy_from_slice(&out);
        }
    }
}

/// Apply `mask` with destination-in, anchored at the origin at its natural size. Pixels the mask
/// does not cover are cleared.
pub fn mask_in_place(dst: &mut Raster, mask: &PreparedImage) {
    let width = dst.width;
    for (i, d) in dst.data.chunks_exact_mut(4).enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let out = destination_in([d[0], d[1], d[2], d[3]], mask.pixel(x, y)[3]);
        d.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
