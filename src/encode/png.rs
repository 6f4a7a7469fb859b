use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{DesignerError, DesignerResult};
use crate::render::raster::Raster;

/// Encode as an RGBA PNG with straight alpha.
pub fn encode_png(raster: &Raster) -> DesignerResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(raster.width, raster.height, raster.to_straight_rgba8())
        .ok_or_else(|| DesignerError::validation("raster buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}
