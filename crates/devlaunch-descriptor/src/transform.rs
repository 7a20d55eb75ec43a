//! Pure descriptor transforms
//!
//! The document is streamed event by event: only the override values in the
//! root start tag are spliced in, every other byte is written back untouched.
//! No document tree is shared or mutated.

use crate::error::DescriptorError;
use crate::overrides::{
    ContextOverrides, BACKGROUND_PROCESSOR_DELAY_ATTR, RELOADABLE_ATTR, ROOT_ELEMENT,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::ops::Range;

/// Apply overrides to a descriptor document
///
/// The root element gets `backgroundProcessorDelay` and `reloadable` set to
/// the override values. Existing override attributes keep their position;
/// missing ones are appended. Everything else (declaration, comments, other
/// attributes, children, whitespace) passes through in order.
///
/// # Errors
/// Returns [`DescriptorError`] if the document is not well-formed XML or has
/// no single root element
pub fn apply_overrides(
    document: &str,
    overrides: &ContextOverrides,
) -> Result<String, DescriptorError> {
    let mut reader = Reader::from_str(document);
    let mut writer = Writer::new(Vec::with_capacity(document.len() + 64));
    let mut depth: usize = 0;
    let mut root_seen = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|source| DescriptorError::Syntax {
                position: reader.error_position() as u64,
                source,
            })?;

        let event = match event {
            Event::Eof => break,
            Event::Start(start) => {
                let start = if depth == 0 {
                    enter_root(&mut root_seen)?;
                    with_overrides(&start, overrides)?
                } else {
                    start
                };
                depth += 1;
                Event::Start(start)
            }
            Event::Empty(start) if depth == 0 => {
                enter_root(&mut root_seen)?;
                Event::Empty(with_overrides(&start, overrides)?)
            }
            Event::End(end) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| DescriptorError::ill_formed("unexpected closing tag"))?;
                Event::End(end)
            }
            Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(DescriptorError::ill_formed("text outside the root element"));
            }
            other => other,
        };

        writer
            .write_event(event)
            .map_err(|e| DescriptorError::Serialize(e.to_string()))?;
    }

    if depth > 0 {
        return Err(DescriptorError::ill_formed("root element is not closed"));
    }
    if !root_seen {
        return Err(DescriptorError::MissingRoot);
    }

    String::from_utf8(writer.into_inner()).map_err(|e| DescriptorError::Serialize(e.to_string()))
}

/// Minimal descriptor carrying only the override attributes
///
/// Used when the project has no descriptor of its own.
#[must_use]
pub fn minimal_descriptor(overrides: &ContextOverrides) -> String {
    format!(
        r#"<{ROOT_ELEMENT} {BACKGROUND_PROCESSOR_DELAY_ATTR}="{}" {RELOADABLE_ATTR}="{}"/>"#,
        overrides.background_processor_delay,
        overrides.reloadable_value()
    )
}

fn enter_root(root_seen: &mut bool) -> Result<(), DescriptorError> {
    if *root_seen {
        return Err(DescriptorError::ill_formed("more than one root element"));
    }
    *root_seen = true;
    Ok(())
}

fn with_overrides(
    root: &BytesStart<'_>,
    overrides: &ContextOverrides,
) -> Result<BytesStart<'static>, DescriptorError> {
    // Validates quoting and rejects duplicates before the raw scan below.
    for attribute in root.attributes() {
        attribute?;
    }

    let delay = overrides.delay_value();
    let reloadable = overrides.reloadable_value();
    let name = root.name();
    let (attributes, trailing) = split_attributes(root.attributes_raw());

    let mut content = Vec::with_capacity(root.len() + 64);
    content.extend_from_slice(name.as_ref());
    let mut delay_written = false;
    let mut reloadable_written = false;

    for attribute in &attributes {
        let replacement = match attribute.key() {
            key if key == BACKGROUND_PROCESSOR_DELAY_ATTR.as_bytes() => {
                delay_written = true;
                Some(delay.as_str())
            }
            key if key == RELOADABLE_ATTR.as_bytes() => {
                reloadable_written = true;
                Some(reloadable)
            }
            _ => None,
        };
        match replacement {
            Some(value) => {
                content.extend_from_slice(&attribute.text[..attribute.value.start]);
                content.extend_from_slice(value.as_bytes());
                content.extend_from_slice(&attribute.text[attribute.value.end..]);
            }
            None => content.extend_from_slice(attribute.text),
        }
    }

    if !delay_written {
        push_attribute(&mut content, BACKGROUND_PROCESSOR_DELAY_ATTR, &delay);
    }
    if !reloadable_written {
        push_attribute(&mut content, RELOADABLE_ATTR, reloadable);
    }
    content.extend_from_slice(trailing);

    let content =
        String::from_utf8(content).map_err(|e| DescriptorError::Serialize(e.to_string()))?;
    Ok(BytesStart::from_content(content, name.as_ref().len()))
}

fn push_attribute(content: &mut Vec<u8>, key: &str, value: &str) {
    content.push(b' ');
    content.extend_from_slice(key.as_bytes());
    content.extend_from_slice(b"=\"");
    content.extend_from_slice(value.as_bytes());
    content.push(b'"');
}

/// One attribute as written in the source, leading whitespace included
struct RawAttribute<'a> {
    text: &'a [u8],
    key: Range<usize>,
    value: Range<usize>,
}

impl RawAttribute<'_> {
    fn key(&self) -> &[u8] {
        &self.text[self.key.clone()]
    }
}

/// Split an already validated attribute list into its source spans
///
/// Returns the attributes and whatever whitespace follows the last one.
fn split_attributes(raw: &[u8]) -> (Vec<RawAttribute<'_>>, &[u8]) {
    let mut attributes = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    loop {
        while raw.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        let key_start = pos;
        while raw
            .get(pos)
            .is_some_and(|b| *b != b'=' && !b.is_ascii_whitespace())
        {
            pos += 1;
        }
        let key_end = pos;
        while raw.get(pos).is_some_and(|b| *b != b'"' && *b != b'\'') {
            pos += 1;
        }
        let Some(&quote) = raw.get(pos) else {
            break;
        };
        let value_start = pos + 1;
        let value_end = raw[value_start..]
            .iter()
            .position(|b| *b == quote)
            .map_or(raw.len(), |offset| value_start + offset);
        pos = (value_end + 1).min(raw.len());

        attributes.push(RawAttribute {
            text: &raw[start..pos],
            key: key_start - start..key_end - start,
            value: value_start - start..value_end - start,
        });
        start = pos;
    }

    (attributes, &raw[start..])
}

/// Read the override attributes back from a document's root element
///
/// Returns `(delay, reloadable)` as raw attribute values.
///
/// # Errors
/// Returns [`DescriptorError`] if the document cannot be parsed
pub fn root_overrides(
    document: &str,
) -> Result<(Option<String>, Option<String>), DescriptorError> {
    let mut reader = Reader::from_str(document);
    loop {
        let event = reader
            .read_event()
            .map_err(|source| DescriptorError::Syntax {
                position: reader.error_position() as u64,
                source,
            })?;
        match event {
            Event::Start(root) | Event::Empty(root) => {
                let mut delay = None;
                let mut reloadable = None;
                for attribute in root.attributes() {
                    let attribute = attribute?;
                    let value = String::from_utf8_lossy(&attribute.value).into_owned();
                    if attribute.key.as_ref() == BACKGROUND_PROCESSOR_DELAY_ATTR.as_bytes() {
                        delay = Some(value);
                    } else if attribute.key.as_ref() == RELOADABLE_ATTR.as_bytes() {
                        reloadable = Some(value);
                    }
                }
                return Ok((delay, reloadable));
            }
            Event::Eof => return Err(DescriptorError::MissingRoot),
            _ => {}
        }
    }
}
