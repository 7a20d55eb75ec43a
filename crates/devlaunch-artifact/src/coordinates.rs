//! Artifact coordinates
//!
//! Provides [`ArtifactCoordinates`] for identifying one resolved dependency.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Coordinates of a resolved dependency
///
/// Displayed as `group:artifact:version` with an optional trailing
/// `:classifier`.
///
/// # Examples
/// - `org.example:core:1.0.0`
/// - `org.example:fixtures:1.0.0:tests`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinates {
    /// Group identifier (e.g. `org.example`)
    pub group_id: String,
    /// Artifact identifier (e.g. `core`)
    pub artifact_id: String,
    /// Resolved version
    pub version: String,
    /// Optional classifier (e.g. `tests`, `sources`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl ArtifactCoordinates {
    /// Create coordinates without a classifier
    #[inline]
    #[must_use]
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
        }
    }
}

impl Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}
