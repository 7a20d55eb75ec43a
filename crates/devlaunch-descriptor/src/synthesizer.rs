//! Temporary context descriptor synthesis
//!
//! [`ContextDescriptorSynthesizer`] turns the project's descriptor (if any)
//! and the launch overrides into one temporary file. The project file itself
//! is only ever read.

use crate::encoding::DescriptorEncoding;
use crate::error::ConfigSynthesisError;
use crate::overrides::ContextOverrides;
use crate::transform::{apply_overrides, minimal_descriptor};
use devlaunch_tempfs::TempResourceRegistry;
use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = "devlaunch-";
const TEMP_SUFFIX: &str = "-context.xml";

/// Path of the synthesized descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemporaryDescriptorHandle(PathBuf);

impl TemporaryDescriptorHandle {
    /// Descriptor path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Display for TemporaryDescriptorHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for TemporaryDescriptorHandle {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Produces the launch's temporary context descriptor
///
/// # Lifecycle
/// - At most one temporary file per synthesizer (one per launch); later
///   calls return the cached handle
/// - The file is written and flushed before it is registered for cleanup
/// - Dropping the synthesizer deletes the file early; the registry still
///   covers abnormal exits
#[derive(Debug)]
pub struct ContextDescriptorSynthesizer {
    registry: TempResourceRegistry,
    temp_dir: Option<PathBuf>,
    produced: Option<TemporaryDescriptorHandle>,
}

impl ContextDescriptorSynthesizer {
    /// Create synthesizer writing to the platform temp directory
    #[inline]
    #[must_use]
    pub fn new(registry: TempResourceRegistry) -> Self {
        Self {
            registry,
            temp_dir: None,
            produced: None,
        }
    }

    /// Write temporary descriptors under `dir` instead
    #[inline]
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Handle produced so far, if any
    #[inline]
    #[must_use]
    pub fn produced(&self) -> Option<&TemporaryDescriptorHandle> {
        self.produced.as_ref()
    }

    /// Synthesize the descriptor for this launch
    ///
    /// - Already produced: the cached handle is returned as-is
    /// - `user_descriptor` exists: a copy with the overrides applied, stored
    ///   in the same character encoding as the original
    /// - Otherwise, `reloadable` set: a minimal one-element descriptor
    /// - Otherwise: `None`, the server defaults apply and nothing is written
    ///
    /// # Errors
    /// - [`ConfigSynthesisError::ReadDescriptor`] if the user descriptor cannot be read
    /// - [`ConfigSynthesisError::Encoding`] if its declared encoding is unusable or its bytes invalid
    /// - [`ConfigSynthesisError::MalformedDescriptor`] if it is not well-formed
    /// - [`ConfigSynthesisError::CreateTempFile`] / [`ConfigSynthesisError::WriteTempFile`] on temp file I/O failure
    pub fn synthesize(
        &mut self,
        user_descriptor: Option<&Path>,
        overrides: &ContextOverrides,
    ) -> Result<Option<TemporaryDescriptorHandle>, ConfigSynthesisError> {
        if let Some(handle) = &self.produced {
            return Ok(Some(handle.clone()));
        }

        let (document, stored) = match user_descriptor.filter(|path| path.exists()) {
            Some(path) => {
                let stored = std::fs::read(path)
                    .map_err(|e| ConfigSynthesisError::read_error(path, e))?;
                let encoding = DescriptorEncoding::detect(&stored)
                    .map_err(|e| ConfigSynthesisError::encoding(path, e))?;
                let source = encoding
                    .decode(&stored)
                    .map_err(|e| ConfigSynthesisError::encoding(path, e))?;
                let document = apply_overrides(&source, overrides)
                    .map_err(|e| ConfigSynthesisError::malformed(path, e))?;
                let bytes = encoding
                    .encode(&document)
                    .map_err(|e| ConfigSynthesisError::encoding(path, e))?;
                tracing::trace!(encoding = encoding.name(), "decoded context descriptor");
                (document, bytes)
            }
            None if overrides.reloadable => {
                let document = minimal_descriptor(overrides);
                let bytes = document.clone().into_bytes();
                (document, bytes)
            }
            None => {
                tracing::debug!("no context descriptor and not reloadable, using server defaults");
                return Ok(None);
            }
        };

        let path = self.write_temp(&stored)?;
        tracing::debug!(path = %path.display(), document = %document, "generated context descriptor");

        self.registry.register_file(&path);
        let handle = TemporaryDescriptorHandle(path);
        self.produced = Some(handle.clone());
        Ok(Some(handle))
    }

    fn write_temp(&self, document: &[u8]) -> Result<PathBuf, ConfigSynthesisError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ConfigSynthesisError::CreateTempFile)?;

        // an unkept NamedTempFile deletes itself, so a failed write leaves nothing behind
        let path = file.path().to_path_buf();
        file.write_all(document)
            .and_then(|()| file.flush())
            .map_err(|e| ConfigSynthesisError::write_error(&path, e))?;

        let (_, path) = file
            .keep()
            .map_err(|e| ConfigSynthesisError::write_error(&path, e.error))?;
        Ok(path)
    }
}

impl Drop for ContextDescriptorSynthesizer {
    fn drop(&mut self) {
        if let Some(handle) = self.produced.take() {
            self.registry.release(handle.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::root_overrides;
    use pretty_assertions::assert_eq;

    fn sandbox() -> (tempfile::TempDir, TempResourceRegistry) {
        (tempfile::tempdir().unwrap(), TempResourceRegistry::new())
    }

    fn temp_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn user_descriptor_is_copied_with_overrides() {
        let (dir, registry) = sandbox();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let user = dir.path().join("context.xml");
        std::fs::write(&user, r#"<Context foo="bar"/>"#).unwrap();

        let mut synthesizer = ContextDescriptorSynthesizer::new(registry.clone()).with_temp_dir(&out);
        let handle = synthesizer
            .synthesize(Some(&user), &ContextOverrides::new(5, true))
            .unwrap()
            .unwrap();

        let written = std::fs::read_to_string(handle.path()).unwrap();
        assert_eq!(
            written,
            r#"<Context foo="bar" backgroundProcessorDelay="5" reloadable="true"/>"#
        );
        assert_eq!(std::fs::read_to_string(&user).unwrap(), r#"<Context foo="bar"/>"#);
        assert!(registry.contains(handle.path()));
    }

    #[test]
    fn latin1_descriptor_keeps_its_encoding() {
        let (dir, registry) = sandbox();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let user = dir.path().join("context.xml");
        let declaration = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n";
        std::fs::write(&user, [&declaration[..], b"<Context displayName=\"caf\xE9\"/>"].concat())
            .unwrap();

        let mut synthesizer = ContextDescriptorSynthesizer::new(registry).with_temp_dir(&out);
        let handle = synthesizer
            .synthesize(Some(&user), &ContextOverrides::new(5, true))
            .unwrap()
            .unwrap();

        let expected = [
            &declaration[..],
            b"<Context displayName=\"caf\xE9\" backgroundProcessorDelay=\"5\" reloadable=\"true\"/>",
        ]
        .concat();
        assert_eq!(std::fs::read(handle.path()).unwrap(), expected);
    }

    #[test]
    fn unsupported_encoding_fails_without_temp_file() {
        let (dir, registry) = sandbox();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let user = dir.path().join("context.xml");
        std::fs::write(&user, r#"<?xml version="1.0" encoding="x-klingon"?><Context/>"#).unwrap();

        let mut synthesizer = ContextDescriptorSynthesizer::new(registry.clone()).with_temp_dir(&out);
        let err = synthesizer
            .synthesize(Some(&user), &ContextOverrides::new(5, true))
            .unwrap_err();

        assert!(matches!(err, ConfigSynthesisError::Encoding { .. }));
        assert!(err.to_string().contains("x-klingon"));
        assert_eq!(temp_files(&out), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn user_descriptor_written_even_when_not_reloadable() {
        let (dir, registry) = sandbox();
        let user = dir.path().join("context.xml");
        std::fs::write(&user, "<Context/>").unwrap();

        let mut synthesizer = ContextDescriptorSynthesizer::new(registry).with_temp_dir(dir.path());
        let handle = synthesizer
            .synthesize(Some(&user), &ContextOverrides::new(-1, false))
            .unwrap()
            .unwrap();

        let written = std::fs::read_to_string(handle.path()).unwrap();
        let (delay, reloadable) = root_overrides(&written).unwrap();
        assert_eq!(delay.as_deref(), Some("-1"));
        assert_eq!(reloadable.as_deref(), Some("false"));
    }

    #[test]
    fn missing_descriptor_not_reloadable_is_none() {
        let (dir, registry) = sandbox();
        let mut synthesizer = ContextDescriptorSynthesizer::new(registry.clone()).with_temp_dir(dir.path());
        let missing = dir.path().join("absent.xml");

        for _ in 0..2 {
            let result = synthesizer
                .synthesize(Some(&missing), &ContextOverrides::default())
                .unwrap();
            assert!(result.is_none());
        }
        assert_eq!(temp_files(dir.path()), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn missing_descriptor_reloadable_creates_one_file() {
        let (dir, registry) = sandbox();
        let mut synthesizer = ContextDescriptorSynthesizer::new(registry.clone()).with_temp_dir(dir.path());
        let overrides = ContextOverrides::new(3, true);

        let first = synthesizer.synthesize(None, &overrides).unwrap().unwrap();
        let second = synthesizer.synthesize(None, &overrides).unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(temp_files(dir.path()), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            std::fs::read_to_string(first.path()).unwrap(),
            r#"<Context backgroundProcessorDelay="3" reloadable="true"/>"#
        );
    }

    #[test]
    fn cached_handle_ignores_later_inputs() {
        let (dir, registry) = sandbox();
        let mut synthesizer = ContextDescriptorSynthesizer::new(registry).with_temp_dir(dir.path());

        let first = synthesizer.synthesize(None, &ContextOverrides::new(1, true)).unwrap();
        let second = synthesizer.synthesize(None, &ContextOverrides::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_descriptor_fails_without_temp_file() {
        let (dir, registry) = sandbox();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let user = dir.path().join("context.xml");
        std::fs::write(&user, "<Context><Loader></Context>").unwrap();

        let mut synthesizer = ContextDescriptorSynthesizer::new(registry.clone()).with_temp_dir(&out);
        let err = synthesizer
            .synthesize(Some(&user), &ContextOverrides::new(5, true))
            .unwrap_err();

        assert!(matches!(err, ConfigSynthesisError::MalformedDescriptor { .. }));
        assert_eq!(temp_files(&out), 0);
        assert!(registry.is_empty());
        assert!(synthesizer.produced().is_none());
    }

    #[test]
    fn unusable_temp_dir_is_create_error() {
        let (dir, registry) = sandbox();
        let mut synthesizer = ContextDescriptorSynthesizer::new(registry)
            .with_temp_dir(dir.path().join("does-not-exist"));

        let err = synthesizer
            .synthesize(None, &ContextOverrides::new(-1, true))
            .unwrap_err();
        assert!(matches!(err, ConfigSynthesisError::CreateTempFile(_)));
    }

    #[test]
    fn drop_releases_file() {
        let (dir, registry) = sandbox();
        let path = {
            let mut synthesizer =
                ContextDescriptorSynthesizer::new(registry.clone()).with_temp_dir(dir.path());
            let handle = synthesizer
                .synthesize(None, &ContextOverrides::new(-1, true))
                .unwrap()
                .unwrap();
            assert!(handle.path().exists());
            handle.path().to_path_buf()
        };
        assert!(!path.exists());
        assert!(registry.is_empty());
    }

    #[test]
    fn temp_file_naming() {
        let (dir, registry) = sandbox();
        let mut synthesizer = ContextDescriptorSynthesizer::new(registry).with_temp_dir(dir.path());
        let handle = synthesizer
            .synthesize(None, &ContextOverrides::new(-1, true))
            .unwrap()
            .unwrap();

        let name = handle.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(TEMP_PREFIX));
        assert!(name.ends_with(TEMP_SUFFIX));
    }
}
