//! Launch-scoped registry of temporary resources
//!
//! Every temporary file or directory created during a launch is registered
//! here. [`TempResourceRegistry::run_cleanup`] drains the registry, so each
//! resource is attempted exactly once no matter how many exit paths fire.

use crate::error::CleanupError;
use crate::resource::TrackedTempResource;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of one cleanup run
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Resources that are no longer on disk
    pub removed: Vec<PathBuf>,
    /// Resources whose removal failed
    pub failures: Vec<CleanupError>,
}

impl CleanupReport {
    /// Number of resources attempted
    #[inline]
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.failures.len()
    }

    /// Check if every resource was removed
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Shared registry of temporary resources
///
/// Cheap to clone; clones share the same set, so the signal thread and the
/// launch path see one registry.
#[derive(Debug, Clone, Default)]
pub struct TempResourceRegistry {
    inner: Arc<Mutex<Vec<TrackedTempResource>>>,
}

impl TempResourceRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource for removal at exit
    ///
    /// Registering the same resource twice keeps a single entry.
    pub fn register(&self, resource: TrackedTempResource) {
        let mut resources = self.inner.lock();
        if resources.contains(&resource) {
            return;
        }
        tracing::debug!(resource = %resource, "registered temporary resource");
        resources.push(resource);
    }

    /// Register a temporary file
    #[inline]
    pub fn register_file(&self, path: impl Into<PathBuf>) {
        self.register(TrackedTempResource::file(path));
    }

    /// Register a temporary directory
    #[inline]
    pub fn register_directory(&self, path: impl Into<PathBuf>) {
        self.register(TrackedTempResource::directory(path));
    }

    /// Remove one resource now and stop tracking it
    ///
    /// Returns `false` if the path was not registered. Removal failures are
    /// logged; the resource is unregistered either way.
    pub fn release(&self, path: &Path) -> bool {
        let resource = {
            let mut resources = self.inner.lock();
            match resources.iter().position(|r| r.path() == path) {
                Some(index) => resources.remove(index),
                None => return false,
            }
        };
        if let Err(e) = resource.remove() {
            tracing::warn!(error = %e, "eager release of temporary resource failed");
        }
        true
    }

    /// Number of resources awaiting cleanup
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if nothing awaits cleanup
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Check if a path is tracked
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.inner.lock().iter().any(|r| r.path() == path)
    }

    /// Remove every registered resource, best-effort
    ///
    /// Each resource is attempted independently; failures are logged and
    /// reported, never raised. The registry is empty afterwards.
    pub fn run_cleanup(&self) -> CleanupReport {
        let resources = std::mem::take(&mut *self.inner.lock());
        let mut report = CleanupReport::default();

        for resource in resources {
            match resource.remove() {
                Ok(()) => report.removed.push(resource.path().to_path_buf()),
                Err(e) => {
                    tracing::warn!(error = %e, "temporary resource cleanup failed");
                    report.failures.push(e);
                }
            }
        }

        if report.attempted() > 0 {
            tracing::debug!(
                removed = report.removed.len(),
                failed = report.failures.len(),
                "temporary resource cleanup finished"
            );
        }
        report
    }
}
