//! Testing utilities for devlaunch workspace
//!
//! Shared fixtures: a throwaway project directory with jar, war and
//! descriptor files laid out the way a resolver would hand them over.

#![allow(missing_docs)]

use devlaunch_artifact::{ArtifactCoordinates, ArtifactRef, Scope};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const GROUP_ID: &str = "org.example";
pub const VERSION: &str = "1.0.0";

pub fn coordinates(artifact_id: &str) -> ArtifactCoordinates {
    ArtifactCoordinates::new(GROUP_ID, artifact_id, VERSION)
}

/// Contents of a fixture web archive
#[derive(Debug, Clone, Default)]
pub struct WarLayout {
    /// `WEB-INF/classes/<path>` files
    pub classes: Vec<(String, Vec<u8>)>,
    /// `WEB-INF/lib/<name>` jar file names
    pub libs: Vec<String>,
    /// Files outside `WEB-INF` (never extracted)
    pub web_resources: Vec<String>,
}

impl WarLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, path: &str, content: &[u8]) -> Self {
        self.classes.push((path.to_string(), content.to_vec()));
        self
    }

    pub fn lib(mut self, name: &str) -> Self {
        self.libs.push(name.to_string());
        self
    }

    pub fn web_resource(mut self, path: &str) -> Self {
        self.web_resources.push(path.to_string());
        self
    }
}

/// Write a web archive at `path`
pub fn write_war(path: &Path, layout: &WarLayout) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.add_directory("WEB-INF/", options).unwrap();
    for resource in &layout.web_resources {
        zip.start_file(resource.as_str(), options).unwrap();
        zip.write_all(b"<html></html>").unwrap();
    }
    for (class, content) in &layout.classes {
        zip.start_file(format!("WEB-INF/classes/{class}"), options).unwrap();
        zip.write_all(content).unwrap();
    }
    for lib in &layout.libs {
        zip.start_file(format!("WEB-INF/lib/{lib}"), options).unwrap();
        zip.write_all(b"PK-fixture-jar").unwrap();
    }
    zip.finish().unwrap();
}

/// Write an archive containing one raw entry name, for path-escape checks
pub fn write_archive_with_entry(path: &Path, entry: &str) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    zip.start_file(entry, SimpleFileOptions::default()).unwrap();
    zip.write_all(b"escaped").unwrap();
    zip.finish().unwrap();
}

/// Throwaway project sandbox
#[derive(Debug)]
pub struct TestProject {
    dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a directory (and parents) inside the project
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a file inside the project
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `compile`-scoped jar artifact backed by a real file
    pub fn jar(&self, artifact_id: &str) -> ArtifactRef {
        let path = self.file(&format!("repo/{artifact_id}-{VERSION}.jar"), "PK-fixture-jar");
        ArtifactRef::new(coordinates(artifact_id), path)
    }

    /// Jar artifact with a given scope
    pub fn scoped_jar(&self, artifact_id: &str, scope: Scope) -> ArtifactRef {
        self.jar(artifact_id).with_scope(scope)
    }

    /// `war` artifact backed by a real archive
    pub fn war(&self, artifact_id: &str, layout: &WarLayout) -> ArtifactRef {
        let path = self.dir("repo").join(format!("{artifact_id}-{VERSION}.war"));
        write_war(&path, layout);
        ArtifactRef::new(coordinates(artifact_id), path).with_packaging("war")
    }

    /// `war` artifact whose file is not a valid archive
    pub fn corrupt_war(&self, artifact_id: &str) -> ArtifactRef {
        let path = self.file(&format!("repo/{artifact_id}-{VERSION}.war"), "not a zip");
        ArtifactRef::new(coordinates(artifact_id), path).with_packaging("war")
    }
}

/// Number of entries directly under `dir`
pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(Iterator::count).unwrap_or(0)
}
