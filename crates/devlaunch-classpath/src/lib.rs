//! devlaunch Classpath Resolution
//!
//! Derives the ordered module-search path for one launch from the resolved
//! artifact set and developer-specified extra directories.
//!
//! # Flow
//!
//! ```text
//! ArtifactSet ─ classify ─┬─ Excluded (scope)
//!                         ├─ DirectEntry ──────────────┐
//!                         └─ NeedsExpansion → temp dir ┤→ entries (ordered, unique)
//! extra dirs ─ exists? ────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use devlaunch_classpath::{ClassLoaderResolutionRequest, ClasspathEntryResolver};
//!
//! let request = ClassLoaderResolutionRequest::builder(artifacts)
//!     .extra_dir("target/classes")
//!     .build();
//! let result = ClasspathEntryResolver::new().resolve(&request)?;
//! for dir in result.temp_directories() {
//!     registry.register_directory(dir);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod expander;
pub mod request;
pub mod resolver;
pub mod war;

pub use error::{ClasspathResolutionError, ExpansionError};
pub use expander::{ArchiveExpander, ArtifactClass, ExpanderRegistry};
pub use request::{ClassLoaderResolutionRequest, ClassLoaderResolutionResult, RequestBuilder};
pub use resolver::ClasspathEntryResolver;
pub use war::WarExpander;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
