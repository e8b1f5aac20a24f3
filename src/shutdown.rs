//! Shutdown coordination
//!
//! Every exit path (tray `Exit`, a close that destroys the main window, the shell
//! itself) funnels through [`ShutdownCoordinator::shutdown`]. Only the first
//! call does anything.

use log::{debug, error, info, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ui::UiRuntime;

/// Cleanup run by a dependent service before the UI runtime exits
pub type CleanupHook = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// Single choke point for graceful process termination
pub struct ShutdownCoordinator {
    runtime: Arc<dyn UiRuntime>,
    hooks: Mutex<Vec<(String, CleanupHook)>>,
    started: AtomicBool,
}

impl ShutdownCoordinator {
    pub fn new(runtime: Arc<dyn UiRuntime>) -> Self {
        Self {
            runtime,
            hooks: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        }
    }

    /// Register cleanup for a dependent service.
    ///
    /// Hooks run in reverse registration order. Returns `false` and drops
    /// the hook if shutdown has already started.
    pub fn register(&self, name: impl Into<String>, hook: CleanupHook) -> bool {
        let name = name.into();
        // `started` is checked under the hooks lock; shutdown takes the same
        // lock after setting it, so an accepted hook is always run.
        let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_shut_down() {
            warn!("Shutdown already in progress, not registering cleanup for {name}");
            return false;
        }
        hooks.push((name, hook));
        true
    }

    /// Whether shutdown has been requested
    pub fn is_shut_down(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Run cleanup and ask the UI runtime to exit.
    ///
    /// Returns `true` for the call that actually performed the shutdown and
    /// `false` for every repeated call. Never panics or fails: cleanup errors
    /// are logged and termination proceeds.
    pub fn shutdown(&self) -> bool {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Shutdown already requested, ignoring");
            return false;
        }

        info!("Shutting down...");

        let hooks = std::mem::take(&mut *self.hooks.lock().unwrap_or_else(PoisonError::into_inner));
        for (name, hook) in hooks.into_iter().rev() {
            match panic::catch_unwind(AssertUnwindSafe(hook)) {
                Ok(Ok(())) => debug!("Cleanup finished: {name}"),
                Ok(Err(e)) => error!("Cleanup failed for {name}: {e:#}"),
                Err(_) => error!("Cleanup panicked for {name}"),
            }
        }

        if let Err(e) = self.runtime.exit() {
            error!("UI runtime did not accept exit request: {e}");
        }

        true
    }
}
