//! devlaunch Context Descriptor Synthesis
//!
//! Produces the temporary context descriptor a launch hands to the embedded
//! server, reflecting the launch-time overrides without touching the
//! project's own descriptor.
//!
//! # Pipeline
//!
//! ```text
//! context.xml (read-only) → decode → apply_overrides → encode → temp file → TempResourceRegistry
//!        ↘ absent + reloadable → minimal_descriptor ↗
//! ```
//!
//! # Example
//!
//! ```rust
//! use devlaunch_descriptor::{apply_overrides, ContextOverrides};
//!
//! let out = apply_overrides(r#"<Context foo="bar"/>"#, &ContextOverrides::new(5, true)).unwrap();
//! assert_eq!(out, r#"<Context foo="bar" backgroundProcessorDelay="5" reloadable="true"/>"#);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod encoding;
pub mod error;
pub mod overrides;
pub mod synthesizer;
pub mod transform;

pub use encoding::DescriptorEncoding;
pub use error::{ConfigSynthesisError, DescriptorError, EncodingError};
pub use overrides::{
    ContextOverrides, BACKGROUND_PROCESSOR_DELAY_ATTR, DISABLED_DELAY, RELOADABLE_ATTR,
    ROOT_ELEMENT,
};
pub use synthesizer::{ContextDescriptorSynthesizer, TemporaryDescriptorHandle};
pub use transform::{apply_overrides, minimal_descriptor, root_overrides};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
