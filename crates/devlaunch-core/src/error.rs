//! Error types for devlaunch core
//!
//! Launch errors name the stage that failed:
//! - classpath resolution
//! - descriptor synthesis
//! - server bootstrap
//!
//! Cleanup errors never appear here; the registry only logs them.

use devlaunch_classpath::ClasspathResolutionError;
use devlaunch_descriptor::ConfigSynthesisError;
use std::path::PathBuf;

/// Main launch error type
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// Module search path could not be derived
    #[error("classpath resolution failed: {0}")]
    ClasspathResolution(#[from] ClasspathResolutionError),

    /// Context descriptor could not be produced
    #[error("descriptor synthesis failed: {0}")]
    DescriptorSynthesis(#[from] ConfigSynthesisError),

    /// Server bootstrap rejected the configuration
    #[error("server bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),
}

impl LaunchError {
    /// Short name of the failing stage
    #[inline]
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::ClasspathResolution(_) => "classpath resolution",
            Self::DescriptorSynthesis(_) => "descriptor synthesis",
            Self::Bootstrap(_) => "server bootstrap",
        }
    }
}

/// Error reported by a [`crate::ServerBootstrap`] implementation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BootstrapError {
    message: String,
}

impl BootstrapError {
    /// Create bootstrap error
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors loading launch configuration or the artifact manifest
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Launch configuration is not valid TOML for [`crate::LaunchConfig`]
    #[error("invalid launch configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Artifact manifest is not a valid JSON artifact list
    #[error("invalid artifact manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Create read error for path
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
