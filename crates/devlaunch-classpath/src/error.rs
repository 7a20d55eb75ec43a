//! Error types for classpath resolution

use devlaunch_artifact::ArtifactCoordinates;
use std::path::PathBuf;

/// Errors while expanding one archive
#[derive(Debug, thiserror::Error)]
pub enum ExpansionError {
    /// Archive could not be opened or read
    #[error("invalid archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Entry name escapes the extraction directory
    #[error("archive entry '{entry}' escapes the extraction directory")]
    UnsafeEntry { entry: String },

    /// Filesystem error while extracting
    #[error("io error extracting to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExpansionError {
    /// Create archive error for path
    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors resolving classpath entries
///
/// Resolution is all-or-nothing: when one of these is returned, no entries
/// and no temporary directories survive the call.
#[derive(Debug, thiserror::Error)]
pub enum ClasspathResolutionError {
    /// Extraction directory could not be created
    #[error("failed to create extraction directory for {artifact}: {source}")]
    TempDirectory {
        artifact: ArtifactCoordinates,
        #[source]
        source: std::io::Error,
    },

    /// Nested archive could not be expanded
    #[error("failed to expand {artifact}: {source}")]
    Expansion {
        artifact: ArtifactCoordinates,
        #[source]
        source: ExpansionError,
    },
}

impl ClasspathResolutionError {
    /// Coordinates of the offending artifact
    #[must_use]
    pub fn artifact(&self) -> &ArtifactCoordinates {
        match self {
            Self::TempDirectory { artifact, .. } | Self::Expansion { artifact, .. } => artifact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_error_names_artifact() {
        let err = ClasspathResolutionError::Expansion {
            artifact: ArtifactCoordinates::new("org.example", "web", "1.0"),
            source: ExpansionError::UnsafeEntry {
                entry: "../evil".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "failed to expand org.example:web:1.0: archive entry '../evil' escapes the extraction directory"
        );
        assert_eq!(err.artifact().artifact_id, "web");
    }
}
