//! Per-artifact classification
//!
//! Each artifact is classified before it contributes to the classpath:
//! - [`ArtifactClass::Excluded`]: filtered out by scope
//! - [`ArtifactClass::DirectEntry`]: its resolved path is the entry
//! - [`ArtifactClass::NeedsExpansion`]: a registered [`ArchiveExpander`]
//!   turns it into directories and jars
//!
//! New archive kinds are added by registering an expander; the resolver's
//! ordering logic does not change.

use crate::error::ExpansionError;
use crate::request::ClassLoaderResolutionRequest;
use crate::war::WarExpander;
use devlaunch_artifact::{ArtifactRef, ClasspathEntry, Scope};
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

/// Expands an archive that packages its own classes and libraries
pub trait ArchiveExpander: Send + Sync + Debug + 'static {
    /// Packaging types handled (e.g. `["war"]`)
    fn packaging(&self) -> &[&str];

    /// Check if this expander handles the artifact
    fn can_expand(&self, artifact: &ArtifactRef) -> bool {
        self.packaging().iter().any(|p| artifact.has_packaging(p))
    }

    /// Extract into `destination` and return the entries it provides
    ///
    /// `destination` exists and is empty. Returned entries must point at
    /// directories or plain jar files inside it, never at nested archives.
    ///
    /// # Errors
    /// Returns [`ExpansionError`] if the archive cannot be read or extracted
    fn expand(
        &self,
        artifact: &ArtifactRef,
        destination: &Path,
    ) -> Result<Vec<ClasspathEntry>, ExpansionError>;

    /// Priority (higher = tried first when several expanders match)
    fn priority(&self) -> i32 {
        0
    }
}

/// How one artifact contributes to the classpath
#[derive(Debug)]
pub enum ArtifactClass<'a> {
    /// Left out because of its scope
    Excluded(Scope),
    /// Added as-is
    DirectEntry(ClasspathEntry),
    /// Extracted by the given expander
    NeedsExpansion(&'a dyn ArchiveExpander),
}

/// Ordered set of archive expanders
#[derive(Debug, Clone)]
pub struct ExpanderRegistry {
    expanders: Vec<Arc<dyn ArchiveExpander>>,
}

impl Default for ExpanderRegistry {
    /// Registry with the web-archive expander
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(WarExpander::new());
        registry
    }
}

impl ExpanderRegistry {
    /// Registry with no expanders (every artifact is a direct entry)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            expanders: Vec::new(),
        }
    }

    /// Register an expander
    pub fn register<E: ArchiveExpander>(&mut self, expander: E) {
        self.expanders.push(Arc::new(expander));
        self.expanders
            .sort_by_key(|e| std::cmp::Reverse(e.priority()));
    }

    /// Number of registered expanders
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.expanders.len()
    }

    /// Check if no expander is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanders.is_empty()
    }

    /// Find the expander for an artifact
    #[must_use]
    pub fn find_for(&self, artifact: &ArtifactRef) -> Option<&dyn ArchiveExpander> {
        self.expanders
            .iter()
            .find(|e| e.can_expand(artifact))
            .map(|e| &**e)
    }

    /// Classify an artifact for a request
    ///
    /// `provided` artifacts are always excluded (the server supplies them);
    /// `test` artifacts only when the request does not use the test scope.
    #[must_use]
    pub fn classify(
        &self,
        artifact: &ArtifactRef,
        request: &ClassLoaderResolutionRequest,
    ) -> ArtifactClass<'_> {
        match artifact.scope() {
            Scope::Provided => return ArtifactClass::Excluded(Scope::Provided),
            Scope::Test if !request.use_test_scope() => return ArtifactClass::Excluded(Scope::Test),
            _ => {}
        }

        if request.include_war_dependencies() {
            if let Some(expander) = self.find_for(artifact) {
                return ArtifactClass::NeedsExpansion(expander);
            }
        }
        ArtifactClass::DirectEntry(ClasspathEntry::from_path(artifact.path()))
    }
}
