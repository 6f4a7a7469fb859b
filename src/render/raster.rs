use image::imageops::{self, FilterType};

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{DesignerError, DesignerResult};
use crate::foundation::math::unpremul_channel;

/// Owned premultiplied RGBA8 pixel buffer, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn transparent(canvas: Canvas) -> DesignerResult<Self> {
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.rgba_len()?],
        })
    }

    /// Raster filled with a single premultiplied color.
    pub fn solid(canvas: Canvas, color: Rgba8Premul) -> DesignerResult<Self> {
        let px = color.to_array();
        let mut data = Vec::with_capacity(canvas.rgba_len()?);
        for _ in 0..(canvas.width as usize * canvas.height as usize) {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    pub fn from_image(image: &PreparedImage) -> DesignerResult<Self> {
        let canvas = Canvas::new(image.width, image.height)?;
        if image.rgba8_premul.len() != canvas.rgba_len()? {
            return Err(DesignerError::validation(
                "image buffer does not match its dimensions",
            ));
        }
        Ok(Self {
            width: image.width,
            height: image.height,
            data: image.rgba8_premul.as_ref().clone(),
        })
    }

    pub fn size(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = self.index(x, y);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Straight-alpha pixel at `(x, y)`, as it would appear in an encoded file.
    pub fn straight_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let [r, g, b, a] = self.pixel(x, y);
        [
            unpremul_channel(r, a),
            unpremul_channel(g, a),
            unpremul_channel(b, a),
            a,
        ]
    }

    /// Copy of the buffer converted to straight alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = unpremul_channel(px[0], a);
            px[1] = unpremul_channel(px[1], a);
            px[2] = unpremul_channel(px[2], a);
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

/// Resample a premultiplied buffer to `to`. Filtering premultiplied data keeps edges free of dark
/// fringes.
pub(crate) fn resize_premul(from: Canvas, data: &[u8], to: Canvas) -> DesignerResult<Raster> {
    let src = image::RgbaImage::from_raw(from.width, from.height, data.to_vec())
        .ok_or_else(|| DesignerError::validation("image buffer does not match its dimensions"))?;
    let scaled = imageops::resize(&src, to.width, to.height, FilterType::Triangle);
    Ok(Raster {
        width: to.width,
        height: to.height,
        data: scaled.into_raw(),
    })
}
