//! devlaunch Temporary Resources
//!
//! Tracks temporary files and directories created during one launch and
//! guarantees they are removed when the process exits.
//!
//! # Contract
//!
//! - [`TempResourceRegistry::register`]: track a path for removal at exit
//! - [`TempResourceRegistry::run_cleanup`]: remove everything, best-effort, once
//! - [`CleanupGuard`] / [`install_signal_cleanup`]: wire cleanup into exit paths
//!
//! Cleanup never fails the caller: each removal is independent and errors are
//! only logged and reported.
//!
//! # Example
//!
//! ```rust
//! use devlaunch_tempfs::{CleanupGuard, TempResourceRegistry};
//!
//! let registry = TempResourceRegistry::new();
//! let guard = CleanupGuard::new(registry.clone());
//!
//! registry.register_directory(std::env::temp_dir().join("devlaunch-example-never-created"));
//! let report = guard.finish();
//! assert!(report.is_clean());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod registry;
pub mod resource;
pub mod shutdown;

pub use error::CleanupError;
pub use registry::{CleanupReport, TempResourceRegistry};
pub use resource::TrackedTempResource;
pub use shutdown::CleanupGuard;
#[cfg(unix)]
pub use shutdown::{install_signal_cleanup, CLEANUP_SIGNALS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
