//! Classpath entry resolution
//!
//! Turns a [`ClassLoaderResolutionRequest`] into the ordered, de-duplicated
//! list of module-search-path entries for one launch.

use crate::error::ClasspathResolutionError;
use crate::expander::{ArtifactClass, ExpanderRegistry};
use crate::request::{ClassLoaderResolutionRequest, ClassLoaderResolutionResult};
use devlaunch_artifact::{ArtifactRef, ClasspathEntry};
use indexmap::IndexSet;
use std::path::PathBuf;
use tempfile::TempDir;

/// Resolves classpath entries from artifacts and extra directories
///
/// # Ordering
/// Entries follow artifact resolution order, then extra-directory order.
/// A repeated entry keeps its first position.
///
/// # Atomicity
/// Extraction directories are held as [`TempDir`] until the whole request
/// succeeds; on any error they are dropped (and deleted) with the partial
/// entry list.
#[derive(Debug, Clone, Default)]
pub struct ClasspathEntryResolver {
    expanders: ExpanderRegistry,
    temp_root: Option<PathBuf>,
}

impl ClasspathEntryResolver {
    /// Create resolver with the default expanders
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create resolver with a custom expander registry
    #[inline]
    #[must_use]
    pub fn with_expanders(expanders: ExpanderRegistry) -> Self {
        Self {
            expanders,
            temp_root: None,
        }
    }

    /// Create extraction directories under `dir` instead of the platform temp dir
    #[inline]
    #[must_use]
    pub fn with_temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    /// Resolve entries for a request
    ///
    /// # Errors
    /// - [`ClasspathResolutionError::TempDirectory`] if an extraction directory cannot be created
    /// - [`ClasspathResolutionError::Expansion`] if a nested archive cannot be expanded
    pub fn resolve(
        &self,
        request: &ClassLoaderResolutionRequest,
    ) -> Result<ClassLoaderResolutionResult, ClasspathResolutionError> {
        let mut entries: IndexSet<ClasspathEntry> = IndexSet::new();
        let mut extraction_dirs: Vec<TempDir> = Vec::new();

        for artifact in request.artifacts() {
            match self.expanders.classify(artifact, request) {
                ArtifactClass::Excluded(scope) => {
                    tracing::trace!(artifact = %artifact, %scope, "artifact excluded from classpath");
                }
                ArtifactClass::DirectEntry(entry) => {
                    entries.insert(entry);
                }
                ArtifactClass::NeedsExpansion(expander) => {
                    let dir = self.extraction_dir(artifact)?;
                    let expanded = expander.expand(artifact, dir.path()).map_err(|source| {
                        ClasspathResolutionError::Expansion {
                            artifact: artifact.coordinates().clone(),
                            source,
                        }
                    })?;
                    entries.extend(expanded);
                    extraction_dirs.push(dir);
                }
            }
        }

        for dir in request.extra_dirs() {
            if dir.exists() {
                entries.insert(ClasspathEntry::from_path(dir));
            } else {
                tracing::debug!(dir = %dir.display(), "skipping missing extra classpath directory");
            }
        }

        // success: ownership of the extraction directories moves to the caller
        let temp_directories: Vec<PathBuf> = extraction_dirs.into_iter().map(TempDir::keep).collect();
        tracing::debug!(
            entries = entries.len(),
            temp_directories = temp_directories.len(),
            "resolved classpath"
        );

        Ok(ClassLoaderResolutionResult::new(
            entries.into_iter().collect(),
            temp_directories,
        ))
    }

    fn extraction_dir(&self, artifact: &ArtifactRef) -> Result<TempDir, ClasspathResolutionError> {
        let prefix = format!("devlaunch-{}-", artifact.artifact_id());
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|source| ClasspathResolutionError::TempDirectory {
            artifact: artifact.coordinates().clone(),
            source,
        })
    }
}
