//! Resolution request and result
//!
//! A request is assembled once per launch with [`RequestBuilder`] and is
//! read-only afterwards.

use devlaunch_artifact::{ArtifactSet, ClasspathEntry};
use std::path::{Path, PathBuf};

/// Input to [`crate::ClasspathEntryResolver::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLoaderResolutionRequest {
    artifacts: ArtifactSet,
    include_war_dependencies: bool,
    use_test_scope: bool,
    extra_dirs: Vec<PathBuf>,
}

impl ClassLoaderResolutionRequest {
    /// Start building a request for an artifact set
    ///
    /// Defaults: war dependencies expanded, test scope excluded, no extra dirs.
    #[inline]
    #[must_use]
    pub fn builder(artifacts: ArtifactSet) -> RequestBuilder {
        RequestBuilder {
            request: Self {
                artifacts,
                include_war_dependencies: true,
                use_test_scope: false,
                extra_dirs: Vec::new(),
            },
        }
    }

    /// Artifacts in resolution order
    #[inline]
    #[must_use]
    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Expand web archives into their classes and libraries
    #[inline]
    #[must_use]
    pub fn include_war_dependencies(&self) -> bool {
        self.include_war_dependencies
    }

    /// Include test-scoped artifacts
    #[inline]
    #[must_use]
    pub fn use_test_scope(&self) -> bool {
        self.use_test_scope
    }

    /// Developer-specified extra directories, in caller order
    #[inline]
    #[must_use]
    pub fn extra_dirs(&self) -> &[PathBuf] {
        &self.extra_dirs
    }

    /// Copy of this request with more extra directories appended
    #[must_use]
    pub fn with_extra_dirs<I, P>(&self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut request = self.clone();
        request.extra_dirs.extend(dirs.into_iter().map(Into::into));
        request
    }
}

/// Builder for [`ClassLoaderResolutionRequest`]
#[derive(Debug, Clone)]
#[must_use]
pub struct RequestBuilder {
    request: ClassLoaderResolutionRequest,
}

impl RequestBuilder {
    /// Set whether web archives are expanded
    pub fn include_war_dependencies(mut self, include: bool) -> Self {
        self.request.include_war_dependencies = include;
        self
    }

    /// Set whether test-scoped artifacts are included
    pub fn use_test_scope(mut self, use_test_scope: bool) -> Self {
        self.request.use_test_scope = use_test_scope;
        self
    }

    /// Append one extra directory
    pub fn extra_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.request.extra_dirs.push(dir.into());
        self
    }

    /// Append several extra directories
    pub fn extra_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.request.extra_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Finish the request
    #[must_use]
    pub fn build(self) -> ClassLoaderResolutionRequest {
        self.request
    }
}

/// Output of [`crate::ClasspathEntryResolver::resolve`]
///
/// The caller owns `temp_directories` and must register them for cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLoaderResolutionResult {
    entries: Vec<ClasspathEntry>,
    temp_directories: Vec<PathBuf>,
}

impl ClassLoaderResolutionResult {
    pub(crate) fn new(entries: Vec<ClasspathEntry>, temp_directories: Vec<PathBuf>) -> Self {
        Self {
            entries,
            temp_directories,
        }
    }

    /// Entries in shadowing order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    /// Extraction directories created during resolution
    #[inline]
    #[must_use]
    pub fn temp_directories(&self) -> &[PathBuf] {
        &self.temp_directories
    }

    /// Check if `path` is one of the extraction directories
    #[must_use]
    pub fn owns_temp_directory(&self, path: &Path) -> bool {
        self.temp_directories.iter().any(|d| d == path)
    }

    /// Split into entries and temp directories
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<ClasspathEntry>, Vec<PathBuf>) {
        (self.entries, self.temp_directories)
    }
}
