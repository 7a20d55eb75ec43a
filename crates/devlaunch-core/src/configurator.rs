//! Runtime loader configuration
//!
//! [`RuntimeLoaderConfigurator`] is the composition root of one launch. It
//! runs the stages in a fixed order:
//!
//! ```text
//! set_delegate → resolve → register temp dirs → add_repository (in order)
//!              → synthesize descriptor → doc_base → context_file
//! ```
//!
//! Any failure aborts the launch with a [`LaunchError`] naming the stage.
//! Temporary directories are registered before anything can fail after
//! them, so the exit cleanup always covers them.

use crate::error::LaunchError;
use crate::loader::{ModuleLoader, ServerBootstrap};
use devlaunch_artifact::ClasspathEntry;
use devlaunch_classpath::{ClassLoaderResolutionRequest, ClasspathEntryResolver};
use devlaunch_descriptor::{ContextDescriptorSynthesizer, ContextOverrides};
use devlaunch_tempfs::TempResourceRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Module-loader behavior for the web application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// The application gets its own module loader
    pub separate_loader: bool,
    /// Parent-first delegation (only applied with a separate loader)
    pub delegate: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            separate_loader: true,
            delegate: true,
        }
    }
}

/// Module loader to configure, with its settings
#[derive(Debug)]
pub struct ClassLoaderConfig<'a, L: ModuleLoader + ?Sized> {
    loader: &'a mut L,
    settings: LoaderSettings,
}

impl<'a, L: ModuleLoader + ?Sized> ClassLoaderConfig<'a, L> {
    /// Pair a loader with its settings
    #[inline]
    pub fn new(loader: &'a mut L, settings: LoaderSettings) -> Self {
        Self { loader, settings }
    }
}

/// Inputs for descriptor synthesis and deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorInputs {
    /// Project-authored context descriptor, if configured
    pub context_file: Option<PathBuf>,
    /// Attributes forced onto the descriptor root
    pub overrides: ContextOverrides,
    /// Document base of the web application
    pub doc_base: PathBuf,
}

/// Outcome of one successful launch configuration
///
/// Owns the descriptor synthesizer: dropping the runtime deletes the
/// temporary descriptor early. Extraction directories stay registered until
/// process exit.
#[derive(Debug)]
pub struct ConfiguredRuntime {
    entries: Vec<ClasspathEntry>,
    temp_directories: Vec<PathBuf>,
    doc_base: PathBuf,
    synthesizer: ContextDescriptorSynthesizer,
}

impl ConfiguredRuntime {
    /// Entries applied to the loader, in order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    /// Extraction directories created for this launch
    #[inline]
    #[must_use]
    pub fn temp_directories(&self) -> &[PathBuf] {
        &self.temp_directories
    }

    /// Document base handed to the bootstrap
    #[inline]
    #[must_use]
    pub fn doc_base(&self) -> &Path {
        &self.doc_base
    }

    /// Synthesized descriptor, or `None` when server defaults apply
    #[must_use]
    pub fn descriptor(&self) -> Option<&Path> {
        self.synthesizer.produced().map(|handle| handle.path())
    }
}

/// Composition root for one launch
#[derive(Debug, Clone)]
pub struct RuntimeLoaderConfigurator {
    registry: TempResourceRegistry,
    resolver: ClasspathEntryResolver,
    descriptor_dir: Option<PathBuf>,
}

impl RuntimeLoaderConfigurator {
    /// Create configurator registering temp resources with `registry`
    #[inline]
    #[must_use]
    pub fn new(registry: TempResourceRegistry) -> Self {
        Self {
            registry,
            resolver: ClasspathEntryResolver::new(),
            descriptor_dir: None,
        }
    }

    /// Use a custom resolver
    #[inline]
    #[must_use]
    pub fn with_resolver(mut self, resolver: ClasspathEntryResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Write the temporary descriptor under `dir`
    #[inline]
    #[must_use]
    pub fn with_descriptor_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.descriptor_dir = Some(dir.into());
        self
    }

    /// Registry receiving every temporary resource
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &TempResourceRegistry {
        &self.registry
    }

    /// Configure the loader and hand the descriptor to the bootstrap
    ///
    /// `extra_dirs` are appended after the request's own extra directories;
    /// missing ones are skipped.
    ///
    /// # Errors
    /// - [`LaunchError::ClasspathResolution`] if the resolver fails
    /// - [`LaunchError::DescriptorSynthesis`] if the descriptor cannot be produced
    /// - [`LaunchError::Bootstrap`] if the bootstrap rejects its inputs
    pub fn configure<L: ModuleLoader + ?Sized>(
        &self,
        loader: ClassLoaderConfig<'_, L>,
        request: &ClassLoaderResolutionRequest,
        extra_dirs: &[PathBuf],
        inputs: &DescriptorInputs,
        bootstrap: &mut dyn ServerBootstrap,
    ) -> Result<ConfiguredRuntime, LaunchError> {
        let ClassLoaderConfig { loader, settings } = loader;
        if settings.separate_loader {
            loader.set_delegate(settings.delegate);
        }

        let request = request.with_extra_dirs(extra_dirs.iter().cloned());
        let (entries, temp_directories) = self.resolver.resolve(&request)?.into_parts();
        for dir in &temp_directories {
            self.registry.register_directory(dir);
        }
        for entry in &entries {
            loader.add_repository(entry);
        }

        let mut synthesizer = ContextDescriptorSynthesizer::new(self.registry.clone());
        if let Some(dir) = &self.descriptor_dir {
            synthesizer = synthesizer.with_temp_dir(dir);
        }
        let descriptor = synthesizer.synthesize(inputs.context_file.as_deref(), &inputs.overrides)?;

        bootstrap.doc_base(&inputs.doc_base)?;
        bootstrap.context_file(descriptor.as_ref().map(|handle| handle.path()))?;

        let descriptor_label = descriptor
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);
        tracing::info!(
            entries = entries.len(),
            temp_directories = temp_directories.len(),
            descriptor = %descriptor_label,
            "runtime configured"
        );

        Ok(ConfiguredRuntime {
            entries,
            temp_directories,
            doc_base: inputs.doc_base.clone(),
            synthesizer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{BootstrapPlan, LoaderPlan};
    use devlaunch_artifact::{ArtifactCoordinates, ArtifactRef, ArtifactSet};

    fn inputs(reloadable: bool) -> DescriptorInputs {
        DescriptorInputs {
            context_file: None,
            overrides: ContextOverrides::new(-1, reloadable),
            doc_base: PathBuf::from("src/main/webapp"),
        }
    }

    #[test]
    fn delegate_only_set_for_separate_loader() {
        let dir = tempfile::tempdir().unwrap();
        let configurator = RuntimeLoaderConfigurator::new(TempResourceRegistry::new())
            .with_descriptor_dir(dir.path());
        let request = ClassLoaderResolutionRequest::builder(ArtifactSet::new()).build();

        let mut shared = LoaderPlan::new();
        let settings = LoaderSettings {
            separate_loader: false,
            delegate: false,
        };
        configurator
            .configure(
                ClassLoaderConfig::new(&mut shared, settings),
                &request,
                &[],
                &inputs(false),
                &mut BootstrapPlan::new(),
            )
            .unwrap();
        assert_eq!(shared.delegate, None);

        let mut separate = LoaderPlan::new();
        configurator
            .configure(
                ClassLoaderConfig::new(&mut separate, LoaderSettings::default()),
                &request,
                &[],
                &inputs(false),
                &mut BootstrapPlan::new(),
            )
            .unwrap();
        assert_eq!(separate.delegate, Some(true));
    }

    #[test]
    fn entries_applied_in_result_order() {
        let dir = tempfile::tempdir().unwrap();
        let classes = dir.path().join("classes");
        std::fs::create_dir(&classes).unwrap();
        let artifacts: ArtifactSet = ["a", "b"]
            .into_iter()
            .map(|id| ArtifactRef::new(ArtifactCoordinates::new("g", id, "1"), format!("/repo/{id}.jar")))
            .collect();
        let request = ClassLoaderResolutionRequest::builder(artifacts).build();

        let mut loader = LoaderPlan::new();
        let mut bootstrap = BootstrapPlan::new();
        let runtime = RuntimeLoaderConfigurator::new(TempResourceRegistry::new())
            .configure(
                ClassLoaderConfig::new(&mut loader, LoaderSettings::default()),
                &request,
                &[classes.clone(), dir.path().join("missing")],
                &inputs(false),
                &mut bootstrap,
            )
            .unwrap();

        let expected = vec![
            ClasspathEntry::from_path("/repo/a.jar"),
            ClasspathEntry::from_path("/repo/b.jar"),
            ClasspathEntry::from_path(&classes),
        ];
        assert_eq!(loader.repositories, expected);
        assert_eq!(runtime.entries(), expected.as_slice());
        assert_eq!(runtime.descriptor(), None);
        assert_eq!(bootstrap.context_file, Some(None));
        assert_eq!(bootstrap.doc_base, Some(PathBuf::from("src/main/webapp")));
    }

    #[test]
    fn dropping_runtime_releases_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TempResourceRegistry::new();
        let configurator =
            RuntimeLoaderConfigurator::new(registry.clone()).with_descriptor_dir(dir.path());
        let request = ClassLoaderResolutionRequest::builder(ArtifactSet::new()).build();

        let runtime = configurator
            .configure(
                ClassLoaderConfig::new(&mut LoaderPlan::new(), LoaderSettings::default()),
                &request,
                &[],
                &inputs(true),
                &mut BootstrapPlan::new(),
            )
            .unwrap();
        let descriptor = runtime.descriptor().unwrap().to_path_buf();
        assert!(descriptor.is_file());
        assert!(registry.contains(&descriptor));

        drop(runtime);
        assert!(!descriptor.exists());
        assert!(registry.is_empty());
    }
}
