//! Platform abstraction layer
//!
//! This module provides one [`PlatformService`] contract with a variant per
//! supported operating system:
//! - Resolving the application and Heroes of the Storm data directories
//! - Building the tray icon and wiring its menu and clicks
//! - Turning "close window" into "iconify window"
//! - Opening URIs and shutting down
//!
//! Variants are plain structs and are not `cfg`-gated; [`create`] picks the
//! one matching the host at startup.

pub mod linux;
pub mod macos;
pub mod windows;

use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::Settings;
use crate::error::{PlatformError, Result};
use crate::shutdown::ShutdownCoordinator;
use crate::temp_dirs::BattleLobbyTempDirectories;
use crate::tray::{ImageSource, TrayAction, TrayIcon, TrayImage};
use crate::ui::UiRuntime;
use crate::window::{HideRequest, MainWindow};

pub use linux::LinuxPlatform;
pub use macos::MacOSPlatform;
pub use windows::WindowsPlatform;

/// Application logo bundled into the binary
pub static LOGO: ImageSource = ImageSource::Embedded {
    name: "logo.png",
    bytes: include_bytes!("../../assets/logo.png"),
};

/// Tray size used when a variant does not say otherwise
pub const DEFAULT_TRAY_ICON_SIZE: u32 = 32;

/// The two directories the application works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDirectories {
    /// Private storage for the application (database, settings, logs)
    pub application_home: PathBuf,

    /// Heroes of the Storm account directory containing replays
    pub hots_home: PathBuf,
}

/// State shared by every platform variant
pub struct PlatformContext {
    settings: Settings,
    runtime: Arc<dyn UiRuntime>,
    shutdown: Arc<ShutdownCoordinator>,
    tray: Mutex<Option<Arc<TrayIcon>>>,
    window_behaviour_installed: AtomicBool,
}

impl PlatformContext {
    pub fn new(settings: Settings, runtime: Arc<dyn UiRuntime>) -> Self {
        let shutdown = Arc::new(ShutdownCoordinator::new(Arc::clone(&runtime)));
        Self {
            settings,
            runtime,
            shutdown,
            tray: Mutex::new(None),
            window_behaviour_installed: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runtime(&self) -> &Arc<dyn UiRuntime> {
        &self.runtime
    }

    pub fn shutdown_coordinator(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Return the tray icon, building it with `build` on first use.
    ///
    /// The lock is held while building, so concurrent callers never create
    /// a second icon. A failed build leaves the slot empty.
    pub fn tray_icon_or_try_init(
        &self,
        build: impl FnOnce() -> Result<TrayIcon>,
    ) -> Result<Arc<TrayIcon>> {
        let mut slot = self.tray.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tray) = slot.as_ref() {
            debug!("Reusing existing tray icon");
            return Ok(Arc::clone(tray));
        }
        let tray = Arc::new(build()?);
        *slot = Some(Arc::clone(&tray));
        Ok(tray)
    }
}

/// Platform-specific operations
pub trait PlatformService: Send + Sync {
    /// Platform name for logging and errors
    fn name(&self) -> &'static str;

    fn context(&self) -> &PlatformContext;

    /// Directories resolved when the variant was created
    fn directories(&self) -> &ApplicationDirectories;

    fn application_home(&self) -> &Path {
        &self.directories().application_home
    }

    fn hots_home(&self) -> &Path {
        &self.directories().hots_home
    }

    /// Keep the process alive with no visible window and turn closing the
    /// main window into iconifying it. Call once at startup.
    fn setup_window_behaviour(&self, window: &Arc<dyn MainWindow>) {
        let context = self.context();
        if context.window_behaviour_installed.swap(true, Ordering::SeqCst) {
            warn!("Window behaviour is already installed, ignoring second setup");
            return;
        }

        context.runtime().set_implicit_exit(false);

        let target = Arc::downgrade(window);
        window.set_on_hiding(Box::new(move |request: &mut HideRequest| {
            if let Some(window) = target.upgrade() {
                window.set_iconified(true);
            }
            request.consume();
        }));
        debug!("Installed window behaviour for {}", self.name());
    }

    /// The tray icon, if this platform supports one
    fn get_tray_icon(&self, _window: &Arc<dyn MainWindow>) -> Result<Arc<TrayIcon>> {
        Err(PlatformError::NotSupported {
            platform: self.name(),
            capability: "tray icon",
        })
    }

    /// Square size in pixels the tray image is scaled to
    fn tray_icon_size(&self) -> u32 {
        DEFAULT_TRAY_ICON_SIZE
    }

    /// Build a tray icon whose `Show` item and double click bring `window`
    /// to front and whose `Exit` item shuts down.
    fn build_tray_icon(&self, image: &ImageSource, window: &Arc<dyn MainWindow>) -> Result<TrayIcon> {
        let context = self.context();
        let image = TrayImage::load(image)?.auto_sized(self.tray_icon_size());

        let runtime = Arc::clone(context.runtime());
        let target = Arc::clone(window);
        let open_action: TrayAction = Arc::new(move || {
            let window = Arc::clone(&target);
            runtime.run_later(Box::new(move || {
                window.set_iconified(false);
                window.show();
                window.to_front();
            }));
        });

        let shutdown = Arc::clone(context.shutdown_coordinator());
        let exit_action: TrayAction = Arc::new(move || {
            shutdown.shutdown();
        });

        info!("Built tray icon for {}", self.name());
        Ok(TrayIcon::new(image, context.settings(), open_action, exit_action))
    }

    /// Gracefully stop the application. Safe to call any number of times.
    fn shutdown(&self) {
        self.context().shutdown_coordinator().shutdown();
    }

    /// Open `uri` with the OS default handler
    fn browse(&self, uri: &str) -> Result<()>;

    /// Branding image used for windows and the tray
    fn logo(&self) -> &'static ImageSource;

    /// Whether a preloader can be shown before the main window exists
    fn is_preloader_supported(&self) -> bool;

    /// Where the game writes its battle lobby files
    fn battle_lobby_temp_directories(&self) -> &BattleLobbyTempDirectories;
}

/// Hand `uri` to the OS without waiting for the handler to finish
pub(crate) fn open_uri(uri: &str) -> Result<()> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(PlatformError::external("Browsing", "empty URI"));
    }
    debug!("Opening {uri}");
    open::that_detached(uri).map_err(|e| PlatformError::external("Browsing", format!("{uri}: {e}")))
}

/// Create the platform service for the host operating system
pub fn create(settings: Settings, runtime: Arc<dyn UiRuntime>) -> Result<Arc<dyn PlatformService>> {
    select(std::env::consts::OS, settings, runtime)
}

/// Create the platform service for `os` (a `std::env::consts::OS` value)
pub fn select(
    os: &str,
    settings: Settings,
    runtime: Arc<dyn UiRuntime>,
) -> Result<Arc<dyn PlatformService>> {
    select_with_home(os, settings, runtime, dirs::home_dir)
}

/// Like [`select`], with the user's home directory looked up by `home`.
///
/// A missing home directory is fatal: nothing can be resolved without it.
pub fn select_with_home(
    os: &str,
    settings: Settings,
    runtime: Arc<dyn UiRuntime>,
    home: impl FnOnce() -> Option<PathBuf>,
) -> Result<Arc<dyn PlatformService>> {
    let home = home()
        .ok_or_else(|| PlatformError::Unavailable("Could not find home directory".to_string()))?;
    select_in(os, settings, runtime, &home, &std::env::temp_dir())
}

fn select_in(
    os: &str,
    settings: Settings,
    runtime: Arc<dyn UiRuntime>,
    home: &Path,
    temp: &Path,
) -> Result<Arc<dyn PlatformService>> {
    let context = PlatformContext::new(settings, runtime);
    let service: Arc<dyn PlatformService> = match os {
        "windows" => Arc::new(WindowsPlatform::new(
            context,
            home,
            WindowsPlatform::lobby_directories(temp),
        )),
        "macos" => Arc::new(MacOSPlatform::new(
            context,
            home,
            MacOSPlatform::lobby_directories(temp),
        )),
        "linux" => Arc::new(LinuxPlatform::new(
            context,
            home,
            LinuxPlatform::lobby_directories(home),
        )),
        other => return Err(PlatformError::UnsupportedOs(other.to_string())),
    };
    info!("Using {} platform service", service.name());
    Ok(service)
}
