//! Tracked temporary resources

use crate::error::CleanupError;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Kind of temporary resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TempResourceKind {
    /// Regular file, removed with `remove_file`
    File,
    /// Directory, removed recursively
    Directory,
}

impl Display for TempResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// A temporary path that must be gone by the time the process exits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackedTempResource {
    path: PathBuf,
    kind: TempResourceKind,
}

impl TrackedTempResource {
    /// Track a temporary file
    #[inline]
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: TempResourceKind::File,
        }
    }

    /// Track a temporary directory
    #[inline]
    #[must_use]
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: TempResourceKind::Directory,
        }
    }

    /// Tracked path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the resource from disk
    ///
    /// A path that no longer exists counts as removed.
    ///
    /// # Errors
    /// Returns [`CleanupError`] if the filesystem refuses the removal
    pub fn remove(&self) -> Result<(), CleanupError> {
        let result = match self.kind {
            TempResourceKind::File => std::fs::remove_file(&self.path),
            TempResourceKind::Directory => std::fs::remove_dir_all(&self.path),
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CleanupError::new(self.clone(), source)),
        }
    }
}

impl Display for TrackedTempResource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path.display())
    }
}
