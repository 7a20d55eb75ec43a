//! Descriptor character encodings
//!
//! Project descriptors are read as bytes. The encoding comes from a byte
//! order mark, then the XML declaration, and defaults to UTF-8. The
//! synthesized copy is written back in the same encoding so its declaration
//! stays truthful.

use crate::error::EncodingError;
use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;

const UTF_8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding a descriptor is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorEncoding {
    encoding: &'static Encoding,
    bom: bool,
}

impl Default for DescriptorEncoding {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            bom: false,
        }
    }
}

impl DescriptorEncoding {
    /// Detect the encoding of a stored document
    ///
    /// # Errors
    /// Returns [`EncodingError::Unsupported`] if the declared encoding is
    /// unknown or cannot be written back byte for byte (UTF-16 and friends)
    pub fn detect(bytes: &[u8]) -> Result<Self, EncodingError> {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            return Self::writable(encoding, true)
                .ok_or_else(|| EncodingError::Unsupported(encoding.name().to_string()));
        }

        let mut reader = Reader::from_reader(bytes);
        let label = match reader.read_event() {
            Ok(Event::Decl(decl)) => match decl.encoding() {
                Some(Ok(label)) => label.into_owned(),
                _ => return Ok(Self::default()),
            },
            // syntax problems surface from the transform with a position
            _ => return Ok(Self::default()),
        };

        Encoding::for_label(&label)
            .and_then(|encoding| Self::writable(encoding, false))
            .ok_or_else(|| EncodingError::Unsupported(String::from_utf8_lossy(&label).into_owned()))
    }

    fn writable(encoding: &'static Encoding, bom: bool) -> Option<Self> {
        (encoding.output_encoding() == encoding).then_some(Self { encoding, bom })
    }

    /// Canonical encoding name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode a stored document
    ///
    /// # Errors
    /// Returns [`EncodingError::Invalid`] if the bytes are not valid in this encoding
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, EncodingError> {
        let (text, had_errors) = if self.bom {
            self.encoding.decode_with_bom_removal(bytes)
        } else {
            self.encoding.decode_without_bom_handling(bytes)
        };
        if had_errors {
            return Err(EncodingError::Invalid(self.name()));
        }
        Ok(text)
    }

    /// Encode a document for storage, restoring the byte order mark
    ///
    /// # Errors
    /// Returns [`EncodingError::Unmappable`] if the document has characters
    /// this encoding cannot represent
    pub fn encode(&self, document: &str) -> Result<Vec<u8>, EncodingError> {
        let (bytes, _, unmappable) = self.encoding.encode(document);
        if unmappable {
            return Err(EncodingError::Unmappable(self.name()));
        }
        let mut stored = Vec::with_capacity(bytes.len() + UTF_8_BOM.len());
        if self.bom {
            stored.extend_from_slice(UTF_8_BOM);
        }
        stored.extend_from_slice(&bytes);
        Ok(stored)
    }
}
