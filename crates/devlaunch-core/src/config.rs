//! Launch configuration
//!
//! A launch is described by a TOML file whose keys mirror the build plugin's
//! parameters. Every key is optional:
//!
//! ```toml
//! war_source_directory = "src/main/webapp"
//! context_file = "src/main/tomcatconf/context.xml"
//! context_reloadable = true
//! background_processor_delay = 5
//! delegate = true
//! use_separate_loader = true
//! add_war_dependencies_in_classloader = true
//! use_test_classpath = false
//! additional_classpath_dirs = ["target/generated-classes"]
//! ```
//!
//! Relative paths are resolved against the directory holding the file.
//! The resolved artifact set comes from a separate JSON manifest, see
//! [`load_artifacts`].

use crate::configurator::{DescriptorInputs, LoaderSettings};
use crate::error::ConfigError;
use devlaunch_artifact::{ArtifactSet, Scope};
use devlaunch_classpath::ClassLoaderResolutionRequest;
use devlaunch_descriptor::{ContextOverrides, DISABLED_DELAY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default document base, relative to the project
pub const DEFAULT_WAR_SOURCE_DIRECTORY: &str = "src/main/webapp";

/// Parameters of one launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Document base of the web application
    pub war_source_directory: PathBuf,
    /// Project-authored context descriptor
    pub context_file: Option<PathBuf>,
    /// Reload the application when its classes change
    pub context_reloadable: bool,
    /// Seconds between background processor runs; `-1` disables it
    pub background_processor_delay: i32,
    /// Parent-first delegation for the application's module loader
    pub delegate: bool,
    /// Give the application its own module loader
    pub use_separate_loader: bool,
    /// Expand `war` dependencies into the classpath
    pub add_war_dependencies_in_classloader: bool,
    /// Include test-scoped dependencies
    pub use_test_classpath: bool,
    /// Extra directories appended after the dependencies
    pub additional_classpath_dirs: Vec<PathBuf>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            war_source_directory: PathBuf::from(DEFAULT_WAR_SOURCE_DIRECTORY),
            context_file: None,
            context_reloadable: false,
            background_processor_delay: DISABLED_DELAY,
            delegate: true,
            use_separate_loader: true,
            add_war_dependencies_in_classloader: true,
            use_test_classpath: false,
            additional_classpath_dirs: Vec::new(),
        }
    }
}

impl LaunchConfig {
    /// Load from a TOML file, resolving relative paths against its directory
    ///
    /// # Errors
    /// - [`ConfigError::Read`] if the file cannot be read
    /// - [`ConfigError::Parse`] if it is not a valid launch configuration
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        tracing::debug!(path = %path.display(), "loaded launch configuration");
        Ok(config.relative_to(base))
    }

    /// Resolve every relative path against `base`
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.war_source_directory = base.join(&self.war_source_directory);
        self.context_file = self.context_file.map(|file| base.join(file));
        for dir in &mut self.additional_classpath_dirs {
            *dir = base.join(&*dir);
        }
        self
    }

    /// Module-loader settings
    #[inline]
    #[must_use]
    pub fn loader_settings(&self) -> LoaderSettings {
        LoaderSettings {
            separate_loader: self.use_separate_loader,
            delegate: self.delegate,
        }
    }

    /// Descriptor overrides
    #[inline]
    #[must_use]
    pub fn overrides(&self) -> ContextOverrides {
        ContextOverrides::new(self.background_processor_delay, self.context_reloadable)
    }

    /// Descriptor synthesis and deployment inputs
    #[must_use]
    pub fn descriptor_inputs(&self) -> DescriptorInputs {
        DescriptorInputs {
            context_file: self.context_file.clone(),
            overrides: self.overrides(),
            doc_base: self.war_source_directory.clone(),
        }
    }

    /// Resolution request for `artifacts`
    ///
    /// Extra directories are not part of the request; pass
    /// [`Self::additional_classpath_dirs`] to the configurator.
    #[must_use]
    pub fn resolution_request(&self, artifacts: ArtifactSet) -> ClassLoaderResolutionRequest {
        ClassLoaderResolutionRequest::builder(artifacts)
            .include_war_dependencies(self.add_war_dependencies_in_classloader)
            .use_test_scope(self.use_test_classpath)
            .build()
    }
}

/// Load a JSON artifact manifest
///
/// Relative artifact paths are resolved against the manifest's directory.
///
/// # Errors
/// - [`ConfigError::Read`] if the file cannot be read
/// - [`ConfigError::Manifest`] if it is not a valid artifact list
pub fn load_artifacts(path: &Path) -> Result<ArtifactSet, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
    let manifest = ArtifactSet::from_json(&text).map_err(|source| ConfigError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let artifacts: ArtifactSet = manifest
        .iter()
        .cloned()
        .map(|artifact| {
            let path = base.join(artifact.path());
            artifact.with_path(path)
        })
        .collect();
    tracing::debug!(
        path = %path.display(),
        artifacts = artifacts.len(),
        tests = artifacts.iter().filter(|a| a.scope() == Scope::Test).count(),
        "loaded artifact manifest"
    );
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: LaunchConfig = toml::from_str("").unwrap();
        assert_eq!(config, LaunchConfig::default());
        assert_eq!(config.overrides(), ContextOverrides::default());
        assert_eq!(config.loader_settings(), LoaderSettings::default());
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(toml::from_str::<LaunchConfig>("reloadble = true").is_err());
    }

    #[test]
    fn relative_paths_follow_base() {
        let config: LaunchConfig = toml::from_str(
            r#"
            context_file = "conf/context.xml"
            additional_classpath_dirs = ["target/extra", "/opt/shared"]
            "#,
        )
        .unwrap();
        let config = config.relative_to(Path::new("/project"));

        assert_eq!(config.war_source_directory, PathBuf::from("/project/src/main/webapp"));
        assert_eq!(config.context_file, Some(PathBuf::from("/project/conf/context.xml")));
        assert_eq!(
            config.additional_classpath_dirs,
            vec![PathBuf::from("/project/target/extra"), PathBuf::from("/opt/shared")]
        );
    }

    #[test]
    fn request_carries_flags() {
        let config = LaunchConfig {
            add_war_dependencies_in_classloader: false,
            use_test_classpath: true,
            additional_classpath_dirs: vec![PathBuf::from("/extra")],
            ..LaunchConfig::default()
        };
        let request = config.resolution_request(ArtifactSet::new());
        assert!(!request.include_war_dependencies());
        assert!(request.use_test_scope());
        assert!(request.extra_dirs().is_empty());
    }

    #[test]
    fn overrides_follow_config() {
        let config = LaunchConfig {
            context_reloadable: true,
            background_processor_delay: 5,
            ..LaunchConfig::default()
        };
        assert_eq!(config.overrides(), ContextOverrides::new(5, true));
        assert_eq!(config.descriptor_inputs().overrides, ContextOverrides::new(5, true));
    }
}
