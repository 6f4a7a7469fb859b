use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{DesignerError, DesignerResult};

/// Admits one export or save at a time. A second request while one is running is rejected with
/// [`DesignerError::Busy`]; nothing is queued.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    busy: AtomicBool,
}

/// Held for the duration of an admitted operation; releases the guard on drop.
#[derive(Debug)]
#[must_use = "the guard is released as soon as the permit is dropped"]
pub struct InFlightPermit<'a> {
    busy: &'a AtomicBool,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, operation: &str) -> DesignerResult<InFlightPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                tracing::warn!(operation, "rejected: another export or save is in flight");
                DesignerError::busy(format!(
                    "cannot start {operation}: another export or save is in flight"
                ))
            })?;
        Ok(InFlightPermit { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
