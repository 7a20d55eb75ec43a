//! devlaunch Artifact Model
//!
//! Read-only view of the dependency set a launch starts from.
//!
//! # Core Concepts
//!
//! - [`ArtifactRef`]: One resolved dependency (coordinates, packaging, scope, path)
//! - [`ArtifactSet`]: Artifacts in resolution order
//! - [`ClasspathEntry`]: One location on the module search path
//!
//! # Example
//!
//! ```rust
//! use devlaunch_artifact::{ArtifactCoordinates, ArtifactRef, ArtifactSet, Scope};
//!
//! let core = ArtifactRef::new(ArtifactCoordinates::new("org.example", "core", "1.0"), "/repo/core.jar");
//! let web = ArtifactRef::new(ArtifactCoordinates::new("org.example", "web", "1.0"), "/repo/web.war")
//!     .with_packaging("war")
//!     .with_scope(Scope::Runtime);
//!
//! let set: ArtifactSet = vec![core, web].into();
//! assert_eq!(set.len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod coordinates;
mod entry;

pub use artifact::{ArtifactRef, ArtifactSet, Scope};
pub use coordinates::ArtifactCoordinates;
pub use entry::ClasspathEntry;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
