//! Process-exit wiring for the registry
//!
//! Two exit paths are covered:
//! - normal return and panic unwinding, via [`CleanupGuard`]'s `Drop`
//! - termination signals (unix), via [`install_signal_cleanup`]
//!
//! Both drain the same registry, so a resource is never attempted twice.

use crate::registry::{CleanupReport, TempResourceRegistry};

/// Runs registry cleanup when dropped
///
/// Hold one in `main` for the lifetime of the launch.
#[derive(Debug)]
#[must_use = "cleanup runs when the guard is dropped"]
pub struct CleanupGuard {
    registry: TempResourceRegistry,
    armed: bool,
}

impl CleanupGuard {
    /// Create guard for registry
    #[inline]
    pub fn new(registry: TempResourceRegistry) -> Self {
        Self {
            registry,
            armed: true,
        }
    }

    /// Guarded registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &TempResourceRegistry {
        &self.registry
    }

    /// Run cleanup now and disarm the guard
    pub fn finish(mut self) -> CleanupReport {
        self.armed = false;
        self.registry.run_cleanup()
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if self.armed {
            let report = self.registry.run_cleanup();
            if !report.is_clean() {
                tracing::warn!(
                    failed = report.failures.len(),
                    "some temporary resources could not be removed at exit"
                );
            }
        }
    }
}

/// Signals that trigger cleanup before the process exits
#[cfg(unix)]
pub const CLEANUP_SIGNALS: [i32; 4] = [
    signal_hook::consts::SIGTERM,
    signal_hook::consts::SIGINT,
    signal_hook::consts::SIGQUIT,
    signal_hook::consts::SIGHUP,
];

/// Remove registered resources when a termination signal arrives
///
/// Spawns a watcher thread. On the first signal in [`CLEANUP_SIGNALS`] it
/// drains the registry and exits with status `128 + signal`. Close the
/// returned handle to stop watching.
///
/// # Errors
/// Returns error if the signal handlers or the thread cannot be set up
#[cfg(unix)]
pub fn install_signal_cleanup(
    registry: TempResourceRegistry,
) -> std::io::Result<signal_hook::iterator::Handle> {
    let mut signals = signal_hook::iterator::Signals::new(CLEANUP_SIGNALS)?;
    let handle = signals.handle();

    std::thread::Builder::new()
        .name("devlaunch-cleanup".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::info!(signal, "termination signal received, removing temporary resources");
                let report = registry.run_cleanup();
                tracing::debug!(removed = report.removed.len(), "signal cleanup done");
                std::process::exit(128 + signal);
            }
        })?;

    Ok(handle)
}
