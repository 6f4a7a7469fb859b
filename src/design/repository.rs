use std::{
    collections::BTreeMap,
    fmt,
    sync::{Mutex, PoisonError},
};

use crate::design::codec::Design;
use crate::foundation::error::{DesignerError, DesignerResult};

/// Opaque key a repository hands back from [`DesignRepository::save`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DesignId(pub u64);

impl fmt::Display for DesignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredDesign {
    pub id: DesignId,
    pub name: String,
    pub design: Design,
    /// PNG of the assembled export taken at save time. Absent for saves that skip rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_png: Option<Vec<u8>>,
}

/// Persistence collaborator. Only whole designs cross this boundary; stored designs are never
/// patched in place.
pub trait DesignRepository: Send + Sync {
    fn save(
        &self,
        name: &str,
        design: &Design,
        preview_png: Option<&[u8]>,
    ) -> DesignerResult<DesignId>;
    fn load(&self, id: DesignId) -> DesignerResult<StoredDesign>;
    fn delete(&self, id: DesignId) -> DesignerResult<()>;
    /// Stored designs in id order.
    fn list(&self) -> DesignerResult<Vec<StoredDesign>>;
}

/// Process-local repository for hosts without a backend and for tests.
#[derive(Debug, Default)]
pub struct MemoryDesignRepository {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    designs: BTreeMap<DesignId, StoredDesign>,
}

impl MemoryDesignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DesignRepository for MemoryDesignRepository {
    fn save(
        &self,
        name: &str,
        design: &Design,
        preview_png: Option<&[u8]>,
    ) -> DesignerResult<DesignId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DesignerError::validation("design name must be non-empty"));
        }
        let mut state = self.state();
        state.next_id += 1;
        let id = DesignId(state.next_id);
        state.designs.insert(
            id,
            StoredDesign {
                id,
                name: name.to_string(),
                design: design.clone(),
                preview_png: preview_png.map(<[u8]>::to_vec),
            },
        );
        tracing::debug!(%id, name, preview = preview_png.is_some(), "saved design");
        Ok(id)
    }

    fn load(&self, id: DesignId) -> DesignerResult<StoredDesign> {
        self.state()
            .designs
            .get(&id)
            .cloned()
            .ok_or_else(|| DesignerError::validation(format!("design {id} not found")))
    }

    fn delete(&self, id: DesignId) -> DesignerResult<()> {
        self.state()
            .designs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DesignerError::validation(format!("design {id} not found")))
    }

    fn list(&self) -> DesignerResult<Vec<StoredDesign>> {
        Ok(self.state().designs.values().cloned().collect())
    }
}
