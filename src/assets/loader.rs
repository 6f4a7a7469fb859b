use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{DesignerError, DesignerResult};

/// Source of decoded images, keyed by the locations the [`AssetResolver`] produces.
///
/// Every failure must surface as [`DesignerError::AssetLoad`] naming the location.
///
/// [`AssetResolver`]: crate::AssetResolver
pub trait ImageLoader: Send + Sync {
    /// Fetch and decode the image at `location`.
    fn load(&self, location: &str) -> DesignerResult<PreparedImage>;
}

/// Loads images from a directory tree; locations are relative paths under `root`.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, location: &str) -> DesignerResult<PreparedImage> {
        let norm = normalize_rel_path(location)
            .map_err(|e| DesignerError::asset_load(location, e))?;
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path)
            .map_err(|e| DesignerError::asset_load(location, format!("read '{}': {e}", path.display())))?;
        let image = decode_image(&bytes).map_err(|e| DesignerError::asset_load(location, e))?;
        tracing::debug!(location, width = image.width, height = image.height, "loaded image");
        Ok(image)
    }
}

/// In-memory image table for embedding hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageLoader {
    images: HashMap<String, PreparedImage>,
}

impl MemoryImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, image: PreparedImage) {
        self.images.insert(location.into(), image);
    }

    /// Decode `bytes` and register them under `location`.
    pub fn insert_encoded(&mut self, location: impl Into<String>, bytes: &[u8]) -> DesignerResult<()> {
        let location = location.into();
        let image = decode_image(bytes).map_err(|e| DesignerError::asset_load(location.clone(), e))?;
        self.images.insert(location, image);
        Ok(())
    }

    pub fn remove(&mut self, location: &str) -> Option<PreparedImage> {
        self.images.remove(location)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&self, location: &str) -> DesignerResult<PreparedImage> {
        self.images
            .get(location)
            .cloned()
            .ok_or_else(|| DesignerError::asset_load(location, "not found"))
    }
}

/// Normalize and validate asset-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> DesignerResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(DesignerError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(DesignerError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(DesignerError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(DesignerError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
