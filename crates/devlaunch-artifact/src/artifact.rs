//! Resolved artifact references
//!
//! An [`ArtifactRef`] is handed to devlaunch by the dependency resolver and is
//! never modified afterwards. An [`ArtifactSet`] keeps them in resolution order.

use crate::coordinates::ArtifactCoordinates;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Dependency scope as reported by the resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Needed to compile and run
    #[default]
    Compile,
    /// Needed only at runtime
    Runtime,
    /// Supplied by the container at runtime
    Provided,
    /// Needed only by tests
    Test,
    /// Provided by the host system
    System,
}

impl Scope {
    /// Lowercase scope name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Provided => "provided",
            Self::Test => "test",
            Self::System => "system",
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved project dependency
///
/// # Invariants
/// - `path` is the resolved location on disk (archive or directory)
/// - Immutable after construction; the `with_*` builders return a new value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Dependency coordinates
    #[serde(flatten)]
    coordinates: ArtifactCoordinates,
    /// Packaging type (`jar`, `war`, ...)
    #[serde(rename = "type", default = "default_packaging")]
    packaging: String,
    /// Dependency scope
    #[serde(default)]
    scope: Scope,
    /// Resolved filesystem path
    path: PathBuf,
}

fn default_packaging() -> String {
    "jar".to_string()
}

impl ArtifactRef {
    /// Create a `jar`, `compile`-scoped artifact
    #[inline]
    #[must_use]
    pub fn new(coordinates: ArtifactCoordinates, path: impl Into<PathBuf>) -> Self {
        Self {
            coordinates,
            packaging: default_packaging(),
            scope: Scope::default(),
            path: path.into(),
        }
    }

    /// Set packaging type
    #[inline]
    #[must_use]
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = packaging.into();
        self
    }

    /// Set scope
    #[inline]
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Same artifact at another location
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Dependency coordinates
    #[inline]
    #[must_use]
    pub fn coordinates(&self) -> &ArtifactCoordinates {
        &self.coordinates
    }

    /// Packaging type as declared
    #[inline]
    #[must_use]
    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// Dependency scope
    #[inline]
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Artifact identifier
    #[inline]
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.coordinates.artifact_id
    }

    /// Resolved path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check packaging type (case-insensitive)
    #[inline]
    #[must_use]
    pub fn has_packaging(&self, packaging: &str) -> bool {
        self.packaging.eq_ignore_ascii_case(packaging)
    }
}

impl Display for ArtifactRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.coordinates, self.packaging, self.scope)
    }
}

/// Ordered set of resolved artifacts
///
/// Order is resolution order and is significant for classpath shadowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactSet(Vec<ArtifactRef>);

impl ArtifactSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an artifact, keeping resolution order
    #[inline]
    pub fn push(&mut self, artifact: ArtifactRef) {
        self.0.push(artifact);
    }

    /// Number of artifacts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in resolution order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactRef> {
        self.0.iter()
    }

    /// Parse a resolved-artifact manifest (JSON array)
    ///
    /// # Errors
    /// Returns error if the JSON does not describe an artifact list
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<ArtifactRef> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = ArtifactRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<ArtifactRef>> for ArtifactSet {
    fn from(artifacts: Vec<ArtifactRef>) -> Self {
        Self(artifacts)
    }
}

impl<'a> IntoIterator for &'a ArtifactSet {
    type Item = &'a ArtifactRef;
    type IntoIter = std::slice::Iter<'a, ArtifactRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
