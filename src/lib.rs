//! Kayak designer compositing and export engine.
//!
//! A user picks fills (colors or pattern finishes) for named regions of a kayak. The engine turns
//! those choices into:
//!
//! - style patches for a live two-view preview ([`PreviewRenderer`])
//! - a flattened, deterministic PNG/PDF export of both views ([`LayerCompositor`],
//!   [`ViewAssembler`], [`ExportEncoder`])
//! - a portable JSON [`Design`] for persistence ([`DesignCodec`])
//!
//! Most hosts only need a [`Designer`] session built from a [`DesignerConfig`] and an
//! [`ImageLoader`].
#![forbid(unsafe_code)]

mod foundation;

/// Asset location resolution, loading and decoding.
pub mod assets;
/// Region catalog, fills and models.
pub mod catalog;
pub mod config;
/// Design documents and persistence.
pub mod design;
/// PNG/PDF export encoding.
pub mod encode;
/// Preview style projection.
pub mod preview;
/// CPU compositing of views.
pub mod render;
/// Session facade.
pub mod session;
pub mod store;

pub use crate::foundation::core::{Canvas, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{DesignerError, DesignerResult};

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::loader::{FsImageLoader, ImageLoader, MemoryImageLoader};
pub use crate::assets::resolver::AssetResolver;
pub use crate::catalog::fill::{Fill, HullFinish, PatternName};
pub use crate::catalog::models::ModelCatalog;
pub use crate::catalog::region::{
    CatalogVersion, Region, RegionCatalog, RegionCategory, View, ViewSet,
};
pub use crate::config::DesignerConfig;
pub use crate::design::codec::{DecodedDesign, Design, DesignCodec, ModelStatus};
pub use crate::design::repository::{
    DesignId, DesignRepository, MemoryDesignRepository, StoredDesign,
};
pub use crate::encode::{ExportEncoder, ExportFormat};
pub use crate::preview::renderer::{
    ElementPatch, ElementStyle, FinishState, HullFinishUpdate, PreviewRenderer, PreviewSnapshot,
};
pub use crate::render::assembler::ViewAssembler;
pub use crate::render::compositor::LayerCompositor;
pub use crate::render::raster::Raster;
pub use crate::session::designer::Designer;
pub use crate::session::guard::InFlightGuard;
pub use crate::store::colors::RegionColorStore;
