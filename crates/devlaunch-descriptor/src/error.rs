//! Error types for descriptor synthesis
//!
//! - [`DescriptorError`]: the document itself cannot be transformed
//! - [`EncodingError`]: the stored bytes cannot be decoded or written back
//! - [`ConfigSynthesisError`]: a synthesis step failed (read, transform, write)

use quick_xml::events::attributes::AttrError;
use std::path::PathBuf;

/// Errors transforming a descriptor document
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// XML syntax error
    #[error("xml syntax error at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Malformed attribute on the root element
    #[error("invalid root attribute: {0}")]
    Attribute(#[from] AttrError),

    /// Structurally invalid document
    #[error("ill-formed document: {0}")]
    IllFormed(String),

    /// Document has no root element
    #[error("document has no root element")]
    MissingRoot,

    /// Output could not be produced
    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

impl DescriptorError {
    /// Create ill-formed document error
    pub fn ill_formed(message: impl Into<String>) -> Self {
        Self::IllFormed(message.into())
    }
}

/// Errors converting a descriptor between bytes and text
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Declared encoding is unknown or cannot be written back
    #[error("unsupported encoding {0}")]
    Unsupported(String),

    /// Bytes are not valid in the detected encoding
    #[error("content is not valid {0}")]
    Invalid(&'static str),

    /// Text has characters the encoding cannot represent
    #[error("content cannot be represented in {0}")]
    Unmappable(&'static str),
}

/// Errors synthesizing the temporary context descriptor
#[derive(Debug, thiserror::Error)]
pub enum ConfigSynthesisError {
    /// User descriptor could not be read
    #[error("io error reading context descriptor {path}: {source}")]
    ReadDescriptor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// User descriptor bytes cannot be decoded or written back
    #[error("cannot decode context descriptor {path}: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: EncodingError,
    },

    /// User descriptor is not a usable document
    #[error("malformed context descriptor {path}: {source}")]
    MalformedDescriptor {
        path: PathBuf,
        #[source]
        source: DescriptorError,
    },

    /// Temporary file could not be created
    #[error("io error creating temporary context descriptor: {0}")]
    CreateTempFile(#[source] std::io::Error),

    /// Temporary file could not be written
    #[error("io error writing temporary context descriptor {path}: {source}")]
    WriteTempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigSynthesisError {
    /// Create read error for path
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDescriptor {
            path: path.into(),
            source,
        }
    }

    /// Create encoding error for path
    pub fn encoding(path: impl Into<PathBuf>, source: EncodingError) -> Self {
        Self::Encoding {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-descriptor error for path
    pub fn malformed(path: impl Into<PathBuf>, source: DescriptorError) -> Self {
        Self::MalformedDescriptor {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteTempFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_names_path() {
        let err = ConfigSynthesisError::malformed("conf/context.xml", DescriptorError::MissingRoot);
        assert_eq!(
            err.to_string(),
            "malformed context descriptor conf/context.xml: document has no root element"
        );
    }

    #[test]
    fn encoding_display_names_encoding() {
        let err = ConfigSynthesisError::encoding(
            "context.xml",
            EncodingError::Unsupported("x-klingon".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "cannot decode context descriptor context.xml: unsupported encoding x-klingon"
        );
    }

    #[test]
    fn source_chain_is_kept() {
        use std::error::Error;

        let err = ConfigSynthesisError::read_error(
            "context.xml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
    }
}
