//! winit glue
//!
//! [`ShellRuntime`] turns [`UiRuntime`] calls into user events on the winit
//! event loop, so posted tasks run on the event loop thread in order.
//! [`ShellWindow`] adapts a winit window to [`MainWindow`].

use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use winit::event_loop::EventLoopProxy;
use winit::window::{Window, WindowId};

use crate::error::{PlatformError, Result};
use crate::platform::PlatformService;
use crate::ui::{UiRuntime, UiTask};
use crate::window::{HidingHandler, HidingHook, MainWindow};

/// Events delivered to the shell's event loop
pub enum ShellEvent {
    /// Work posted from another thread
    Run(UiTask),
    /// Stop the event loop
    Exit,
}

/// [`UiRuntime`] backed by a winit event loop proxy
pub struct ShellRuntime {
    proxy: Mutex<EventLoopProxy<ShellEvent>>,
    implicit_exit: AtomicBool,
}

impl ShellRuntime {
    pub fn new(proxy: EventLoopProxy<ShellEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
            implicit_exit: AtomicBool::new(true),
        }
    }

    fn send(&self, event: ShellEvent) -> bool {
        self.proxy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .send_event(event)
            .is_ok()
    }
}

impl UiRuntime for ShellRuntime {
    fn run_later(&self, task: UiTask) {
        if !self.send(ShellEvent::Run(task)) {
            debug!("Event loop closed, dropping task");
        }
    }

    fn set_implicit_exit(&self, implicit_exit: bool) {
        self.implicit_exit.store(implicit_exit, Ordering::SeqCst);
    }

    fn implicit_exit(&self) -> bool {
        self.implicit_exit.load(Ordering::SeqCst)
    }

    fn exit(&self) -> Result<()> {
        if self.send(ShellEvent::Exit) {
            Ok(())
        } else {
            Err(PlatformError::external(
                "Stopping event loop",
                "event loop already closed",
            ))
        }
    }
}

/// The application's main winit window
pub struct ShellWindow {
    window: Window,
    hiding: HidingHook,
}

impl ShellWindow {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            hiding: HidingHook::default(),
        }
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }
}

impl MainWindow for ShellWindow {
    fn set_iconified(&self, iconified: bool) {
        self.window.set_minimized(iconified);
    }

    fn is_iconified(&self) -> bool {
        self.window.is_minimized().unwrap_or(false)
    }

    fn show(&self) {
        self.window.set_visible(true);
    }

    fn to_front(&self) {
        self.window.focus_window();
    }

    fn is_showing(&self) -> bool {
        self.window.is_visible().unwrap_or(true) && !self.is_iconified()
    }

    fn set_on_hiding(&self, handler: HidingHandler) {
        self.hiding.install(handler);
    }

    fn request_close(&self) -> bool {
        if self.hiding.fire() {
            return true;
        }
        self.window.set_visible(false);
        false
    }
}

/// Route a window manager close request through the window policy.
///
/// Returns `true` while the window stays alive (iconified on every platform
/// once [`PlatformService::setup_window_behaviour`] ran). A window closed
/// before the policy was installed is gone, so the application shuts down.
pub fn close_main_window(platform: &dyn PlatformService, window: &dyn MainWindow) -> bool {
    if window.request_close() {
        debug!("Close request kept the main window alive");
        return true;
    }
    info!("Main window closed");
    platform.shutdown();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::platform;
    use crate::ui::TaskQueue;
    use crate::window::testing::FakeWindow;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn service(os: &str) -> (Arc<dyn PlatformService>, Arc<TaskQueue>) {
        let queue = Arc::new(TaskQueue::new());
        let service = platform::select_with_home(os, Settings::default(), queue.clone(), || {
            Some(PathBuf::from("/home/tester"))
        })
        .unwrap();
        (service, queue)
    }

    #[test]
    fn test_close_iconifies_without_tray() {
        let (service, queue) = service("linux");
        let fake = Arc::new(FakeWindow::new());
        let window: Arc<dyn MainWindow> = fake.clone();
        service.setup_window_behaviour(&window);

        assert!(close_main_window(service.as_ref(), fake.as_ref()));
        assert!(fake.is_alive());
        assert!(fake.is_iconified());
        assert!(!queue.exit_requested());

        // Restored from the taskbar, then closed again
        fake.set_iconified(false);
        assert!(close_main_window(service.as_ref(), fake.as_ref()));
        assert!(fake.is_iconified());
        assert!(!queue.exit_requested());
    }

    #[test]
    fn test_close_iconifies_on_every_platform() {
        for os in ["windows", "macos", "linux"] {
            let (service, queue) = service(os);
            let fake = Arc::new(FakeWindow::new());
            let window: Arc<dyn MainWindow> = fake.clone();
            service.setup_window_behaviour(&window);

            assert!(close_main_window(service.as_ref(), fake.as_ref()), "{os}");
            assert!(!queue.exit_requested(), "{os}");
        }
    }

    #[test]
    fn test_close_before_window_behaviour_shuts_down() {
        let (service, queue) = service("linux");
        let fake = FakeWindow::new();

        assert!(!close_main_window(service.as_ref(), &fake));
        assert!(!fake.is_alive());
        assert!(queue.exit_requested());
    }
}
