//! devlaunch Core - Launch-time runtime configuration
//!
//! The composition root that:
//! - Resolves the web application's module search path
//! - Registers every temporary resource for exit cleanup
//! - Applies the entries to the module loader in shadowing order
//! - Synthesizes the context descriptor and hands it to the server bootstrap
//!
//! # Example
//!
//! ```rust,ignore
//! use devlaunch_core::{load_artifacts, ClassLoaderConfig, LaunchConfig, RuntimeLoaderConfigurator};
//!
//! let config = LaunchConfig::load(Path::new("devlaunch.toml"))?;
//! let artifacts = load_artifacts(Path::new("artifacts.json"))?;
//!
//! let configurator = RuntimeLoaderConfigurator::new(registry.clone());
//! let runtime = configurator.configure(
//!     ClassLoaderConfig::new(&mut loader, config.loader_settings()),
//!     &config.resolution_request(artifacts),
//!     &config.additional_classpath_dirs,
//!     &config.descriptor_inputs(),
//!     &mut bootstrap,
//! )?;
//! println!("{} entries", runtime.entries().len());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod configurator;
pub mod error;
pub mod loader;

pub use config::{load_artifacts, LaunchConfig, DEFAULT_WAR_SOURCE_DIRECTORY};
pub use configurator::{
    ClassLoaderConfig, ConfiguredRuntime, DescriptorInputs, LoaderSettings,
    RuntimeLoaderConfigurator,
};
pub use error::{BootstrapError, ConfigError, LaunchError};
pub use loader::{BootstrapPlan, LoaderPlan, ModuleLoader, ServerBootstrap};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for configuring a launch
    pub use crate::{
        ClassLoaderConfig, DescriptorInputs, LaunchConfig, LaunchError, LoaderSettings,
        ModuleLoader, RuntimeLoaderConfigurator, ServerBootstrap,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
