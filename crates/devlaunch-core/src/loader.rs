//! Seams to the embedded server
//!
//! The configurator never talks to a server directly. It drives two traits:
//! - [`ModuleLoader`]: the web application's module-loading delegate
//! - [`ServerBootstrap`]: the step that deploys the application context
//!
//! [`LoaderPlan`] and [`BootstrapPlan`] record what they are told, for
//! dry runs and tests.

use crate::error::BootstrapError;
use devlaunch_artifact::ClasspathEntry;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Module-loading delegate of one web application
pub trait ModuleLoader {
    /// Set parent-first delegation
    fn set_delegate(&mut self, delegate: bool);

    /// Append a search location; earlier locations shadow later ones
    fn add_repository(&mut self, entry: &ClasspathEntry);
}

/// Server step that deploys the application context
pub trait ServerBootstrap {
    /// Document base of the web application
    ///
    /// # Errors
    /// Returns [`BootstrapError`] if the server rejects the directory
    fn doc_base(&mut self, doc_base: &Path) -> Result<(), BootstrapError>;

    /// Context descriptor to deploy with, or `None` for server defaults
    ///
    /// # Errors
    /// Returns [`BootstrapError`] if the server rejects the descriptor
    fn context_file(&mut self, descriptor: Option<&Path>) -> Result<(), BootstrapError>;
}

/// Recording [`ModuleLoader`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoaderPlan {
    /// Delegate flag, if it was set
    pub delegate: Option<bool>,
    /// Search locations in the order they were added
    pub repositories: Vec<ClasspathEntry>,
}

impl LoaderPlan {
    /// Create empty plan
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModuleLoader for LoaderPlan {
    fn set_delegate(&mut self, delegate: bool) {
        self.delegate = Some(delegate);
    }

    fn add_repository(&mut self, entry: &ClasspathEntry) {
        self.repositories.push(entry.clone());
    }
}

/// Recording [`ServerBootstrap`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapPlan {
    /// Document base, if it was set
    pub doc_base: Option<PathBuf>,
    /// Descriptor handed over (`None` inside means server defaults)
    pub context_file: Option<Option<PathBuf>>,
}

impl BootstrapPlan {
    /// Create empty plan
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor path, if one was handed over
    #[must_use]
    pub fn descriptor(&self) -> Option<&Path> {
        self.context_file.as_ref().and_then(|file| file.as_deref())
    }
}

impl ServerBootstrap for BootstrapPlan {
    fn doc_base(&mut self, doc_base: &Path) -> Result<(), BootstrapError> {
        self.doc_base = Some(doc_base.to_path_buf());
        Ok(())
    }

    fn context_file(&mut self, descriptor: Option<&Path>) -> Result<(), BootstrapError> {
        self.context_file = Some(descriptor.map(Path::to_path_buf));
        Ok(())
    }
}
