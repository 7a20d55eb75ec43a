//! Classpath entries
//!
//! Provides [`ClasspathEntry`], one search location handed to the module loader.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// One module-search-path location (a directory or an archive path)
///
/// Entries are order-significant: an earlier entry shadows a later one that
/// provides a resource with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClasspathEntry(String);

impl ClasspathEntry {
    /// Create entry from a filesystem path
    #[inline]
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().into_owned())
    }

    /// Entry as string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Entry as filesystem path
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl Display for ClasspathEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Path> for ClasspathEntry {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}

impl From<PathBuf> for ClasspathEntry {
    fn from(path: PathBuf) -> Self {
        Self::from_path(path)
    }
}

impl AsRef<Path> for ClasspathEntry {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
