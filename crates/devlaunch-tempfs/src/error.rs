//! Cleanup errors
//!
//! These are collected and logged, never returned from a launch.

use crate::resource::TrackedTempResource;

/// Failure removing one tracked resource
#[derive(Debug, thiserror::Error)]
#[error("failed to remove temporary {resource}: {source}")]
pub struct CleanupError {
    resource: TrackedTempResource,
    #[source]
    source: std::io::Error,
}

impl CleanupError {
    /// Create cleanup error for resource
    pub fn new(resource: TrackedTempResource, source: std::io::Error) -> Self {
        Self { resource, source }
    }

    /// Resource that could not be removed
    #[inline]
    #[must_use]
    pub fn resource(&self) -> &TrackedTempResource {
        &self.resource
    }
}
