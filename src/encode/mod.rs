use std::{fmt, str::FromStr};

use crate::foundation::error::{DesignerError, DesignerResult};
use crate::render::raster::Raster;

pub mod pdf;
pub mod png;

/// Export file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DesignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            other => Err(DesignerError::validation(format!(
                "unknown export format '{other}' (expected png or pdf)"
            ))),
        }
    }
}

/// Serializes a flattened composite. Both encodings are pure functions of the raster.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportEncoder;

impl ExportEncoder {
    pub fn to_png(&self, raster: &Raster) -> DesignerResult<Vec<u8>> {
        png::encode_png(raster)
    }

    pub fn to_pdf(&self, raster: &Raster) -> DesignerResult<Vec<u8>> {
        pdf::encode_pdf(raster)
    }

    #[tracing::instrument(skip(self, raster), fields(width = raster.width, height = raster.height))]
    pub fn encode(&self, format: ExportFormat, raster: &Raster) -> DesignerResult<Vec<u8>> {
        let bytes = match format {
            ExportFormat::Png => self.to_png(raster)?,
            ExportFormat::Pdf => self.to_pdf(raster)?,
        };
        tracing::debug!(len = bytes.len(), "encoded export");
        Ok(bytes)
    }
}
