//! Web-archive expansion
//!
//! A `war` dependency carries its classes under `WEB-INF/classes` and its
//! libraries under `WEB-INF/lib`. Only those are extracted; web resources
//! stay in the archive.

use crate::error::ExpansionError;
use crate::expander::ArchiveExpander;
use devlaunch_artifact::{ArtifactRef, ClasspathEntry};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

const CLASSES_DIR: &str = "WEB-INF/classes";
const LIB_DIR: &str = "WEB-INF/lib";

/// Expands `war` artifacts into `WEB-INF/classes` and `WEB-INF/lib/*.jar`
#[derive(Debug, Clone, Copy, Default)]
pub struct WarExpander;

impl WarExpander {
    /// Create web-archive expander
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExpander for WarExpander {
    fn packaging(&self) -> &[&str] {
        &["war"]
    }

    fn expand(
        &self,
        artifact: &ArtifactRef,
        destination: &Path,
    ) -> Result<Vec<ClasspathEntry>, ExpansionError> {
        let archive_path = artifact.path();
        let file = File::open(archive_path).map_err(|e| ExpansionError::io_error(archive_path, e))?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| ExpansionError::archive(archive_path, e))?;

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| ExpansionError::archive(archive_path, e))?;
            if !is_class_or_library(entry.name()) {
                continue;
            }

            let relative = entry
                .enclosed_name()
                .ok_or_else(|| ExpansionError::UnsafeEntry {
                    entry: entry.name().to_string(),
                })?;
            let target = destination.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target).map_err(|e| ExpansionError::io_error(&target, e))?;
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| ExpansionError::io_error(parent, e))?;
            }
            let mut out = File::create(&target).map_err(|e| ExpansionError::io_error(&target, e))?;
            io::copy(&mut entry, &mut out).map_err(|e| ExpansionError::io_error(&target, e))?;
        }

        let entries = expanded_entries(destination)?;
        tracing::debug!(
            artifact = %artifact.coordinates(),
            destination = %destination.display(),
            entries = entries.len(),
            "expanded web archive"
        );
        Ok(entries)
    }
}

fn is_class_or_library(name: &str) -> bool {
    if let Some(rest) = name.strip_prefix(CLASSES_DIR) {
        return rest.starts_with('/');
    }
    name.strip_prefix(LIB_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|jar| !jar.contains('/') && has_jar_extension(jar))
}

fn has_jar_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"))
}

/// `WEB-INF/classes`, then library jars by file name; the root if neither exists
fn expanded_entries(destination: &Path) -> Result<Vec<ClasspathEntry>, ExpansionError> {
    let mut entries = Vec::new();

    let classes = destination.join(CLASSES_DIR);
    if classes.is_dir() {
        entries.push(ClasspathEntry::from_path(&classes));
    }

    let lib = destination.join(LIB_DIR);
    if lib.is_dir() {
        let mut jars = Vec::new();
        for dir_entry in fs::read_dir(&lib).map_err(|e| ExpansionError::io_error(&lib, e))? {
            let path = dir_entry.map_err(|e| ExpansionError::io_error(&lib, e))?.path();
            let is_jar = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(has_jar_extension);
            if path.is_file() && is_jar {
                jars.push(path);
            }
        }
        jars.sort();
        entries.extend(jars.into_iter().map(ClasspathEntry::from));
    }

    if entries.is_empty() {
        entries.push(ClasspathEntry::from_path(destination));
    }
    Ok(entries)
}
