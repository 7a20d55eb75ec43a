//! Printable launch plan

use devlaunch_artifact::ClasspathEntry;
use devlaunch_core::{BootstrapPlan, ConfiguredRuntime, LoaderPlan};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// What a launch would hand to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LaunchPlan {
    pub(crate) delegate: Option<bool>,
    pub(crate) entries: Vec<ClasspathEntry>,
    pub(crate) temp_directories: Vec<PathBuf>,
    pub(crate) descriptor: Option<PathBuf>,
    pub(crate) doc_base: Option<PathBuf>,
}

impl LaunchPlan {
    pub(crate) fn new(loader: LoaderPlan, bootstrap: &BootstrapPlan, runtime: &ConfiguredRuntime) -> Self {
        Self {
            delegate: loader.delegate,
            entries: loader.repositories,
            temp_directories: runtime.temp_directories().to_vec(),
            descriptor: bootstrap.descriptor().map(PathBuf::from),
            doc_base: bootstrap.doc_base.clone(),
        }
    }
}

impl Display for LaunchPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let delegate = self
            .delegate
            .map_or_else(|| "unchanged".to_string(), |d| d.to_string());
        writeln!(f, "delegate: {delegate}")?;
        match &self.doc_base {
            Some(dir) => writeln!(f, "doc base: {}", dir.display())?,
            None => writeln!(f, "doc base: -")?,
        }
        match &self.descriptor {
            Some(path) => writeln!(f, "context file: {}", path.display())?,
            None => writeln!(f, "context file: none (server defaults)")?,
        }
        writeln!(f, "classpath ({} entries):", self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "  {entry}")?;
        }
        if !self.temp_directories.is_empty() {
            writeln!(f, "temporary directories:")?;
            for dir in &self.temp_directories {
                writeln!(f, "  {}", dir.display())?;
            }
        }
        Ok(())
    }
}
