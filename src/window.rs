//! Main window abstraction
//!
//! The platform layer only needs a handful of window operations. The winit
//! shell implements them for a real window; tests use [`testing::FakeWindow`].

use std::sync::{Mutex, PoisonError};

/// Handler invoked when the window is about to be hidden or closed
pub type HidingHandler = Box<dyn Fn(&mut HideRequest) + Send + Sync>;

/// A pending hide/close of the main window
#[derive(Debug, Default)]
pub struct HideRequest {
    consumed: bool,
}

impl HideRequest {
    /// Suppress the default action (destroying the window)
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Operations the platform layer performs on the application's main window
pub trait MainWindow: Send + Sync {
    fn set_iconified(&self, iconified: bool);

    fn is_iconified(&self) -> bool;

    /// Make the window visible
    fn show(&self);

    /// Raise the window above other windows
    fn to_front(&self);

    fn is_showing(&self) -> bool;

    /// Install the handler run whenever the window is asked to hide or close
    fn set_on_hiding(&self, handler: HidingHandler);

    /// Handle a close request from the window manager.
    ///
    /// Runs the hiding handler. Returns `true` if the handler kept the window
    /// alive; otherwise the window has been hidden for good.
    fn request_close(&self) -> bool;
}

/// Storage for a window's hiding handler
#[derive(Default)]
pub struct HidingHook {
    handler: Mutex<Option<HidingHandler>>,
}

impl HidingHook {
    pub fn install(&self, handler: HidingHandler) {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    /// Run the installed handler for a hide/close request.
    ///
    /// Returns `true` if the handler consumed the request, i.e. the window
    /// must stay alive.
    pub fn fire(&self) -> bool {
        let mut request = HideRequest::default();
        if let Some(handler) = self.handler.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
            handler(&mut request);
        }
        request.is_consumed()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeWindow;
    use super::*;

    #[test]
    fn test_close_without_handler_destroys() {
        let window = FakeWindow::new();
        assert!(!window.request_close());
        assert!(!window.is_alive());
    }

    #[test]
    fn test_consumed_close_keeps_window() {
        let window = FakeWindow::new();
        window.set_on_hiding(Box::new(HideRequest::consume));
        assert!(window.request_close());
        assert!(window.is_alive());
    }

    #[test]
    fn test_unconsumed_handler_still_runs() {
        let hook = HidingHook::default();
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&calls);
        hook.install(Box::new(move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }));

        assert!(!hook.fire());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
