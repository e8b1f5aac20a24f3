//! HotS Replay Uploader - desktop shell
//!
//! Opens the main window and puts the uploader into the system tray where
//! the platform supports it.
//!
//! Architecture:
//! - Main thread: runs the winit event loop and owns the window and tray entry
//! - Tray callbacks: arrive on the OS event thread and post work to the loop

use anyhow::{Context, Result};
use hots_replay_uploader::config::{Settings, APPLICATION_NAME};
use hots_replay_uploader::platform::{self, PlatformService};
use hots_replay_uploader::shell::{self, ShellEvent, ShellRuntime, ShellWindow};
use hots_replay_uploader::tray::{native::NativeTray, TrayIcon, TrayImage};
use hots_replay_uploader::window::MainWindow;
use log::{error, info, warn};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Icon, Window, WindowId};

/// Application state
struct App {
    platform: Arc<dyn PlatformService>,
    window: Option<Arc<ShellWindow>>,
    tray: Option<(Arc<TrayIcon>, NativeTray)>,
}

impl App {
    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<ShellWindow> {
        let mut attributes = Window::default_attributes().with_title(APPLICATION_NAME);

        match TrayImage::load(self.platform.logo()) {
            Ok(logo) => match Icon::from_rgba(logo.rgba().to_vec(), logo.width(), logo.height()) {
                Ok(icon) => attributes = attributes.with_window_icon(Some(icon)),
                Err(e) => warn!("Invalid window icon: {e}"),
            },
            Err(e) => warn!("{e}"),
        }

        let window = event_loop
            .create_window(attributes)
            .context("Failed to create main window")?;
        Ok(ShellWindow::new(window))
    }

    fn install_tray(&self, window: &Arc<dyn MainWindow>) -> Option<(Arc<TrayIcon>, NativeTray)> {
        let tray = match self.platform.get_tray_icon(window) {
            Ok(tray) => tray,
            Err(e) => {
                warn!("Continuing without tray icon: {e}");
                return None;
            }
        };

        match NativeTray::install(&tray, cfg!(target_os = "macos")) {
            Ok(native) => {
                tray.set_tooltip(APPLICATION_NAME);
                native.sync_tooltip(&tray);
                info!("✅ System tray initialized");
                Some((tray, native))
            }
            Err(e) => {
                warn!("Continuing without tray icon: {e}");
                None
            }
        }
    }
}

impl ApplicationHandler<ShellEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("{e:#}");
                self.platform.shutdown();
                return;
            }
        };

        let main: Arc<dyn MainWindow> = window.clone();
        self.platform.setup_window_behaviour(&main);
        self.tray = self.install_tray(&main);
        self.window = Some(window);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let WindowEvent::CloseRequested = event else {
            return;
        };
        let Some(window) = self.window.as_ref().filter(|w| w.id() == id) else {
            return;
        };

        // Iconifies on every platform; the taskbar or dock restores it
        if !shell::close_main_window(self.platform.as_ref(), window.as_ref()) {
            self.window = None;
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ShellEvent) {
        match event {
            ShellEvent::Run(task) => task(),
            ShellEvent::Exit => {
                info!("Event loop exiting");
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    info!("Starting {APPLICATION_NAME}...");

    let event_loop = EventLoop::<ShellEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let runtime = Arc::new(ShellRuntime::new(event_loop.create_proxy()));

    // Fatal platform problems must surface before any window exists
    let platform = platform::create(Settings::from_env(), runtime)
        .context("Failed to initialise platform")?;

    info!("Application home: {}", platform.application_home().display());
    info!("HotS home: {}", platform.hots_home().display());
    info!(
        "Battle lobby directory: {}",
        platform.battle_lobby_temp_directories().lobby_root().display()
    );
    if !platform.is_preloader_supported() {
        info!("Preloader not supported on {}", platform.name());
    }

    let mut app = App {
        platform,
        window: None,
        tray: None,
    };

    info!("🔄 Running event loop...");
    event_loop.run_app(&mut app).context("Event loop failed")?;

    // Dropping the tray entry removes it from the notification area
    drop(app.tray.take());
    info!("Goodbye");
    Ok(())
}
