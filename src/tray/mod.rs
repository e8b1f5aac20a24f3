//! System tray integration
//!
//! [`TrayIcon`] is the platform-neutral tray model: image, `Show`/`Exit`
//! menu, tooltip and click handling. [`native::NativeTray`] puts a model into
//! the OS notification area using the `tray-icon` crate.
//!
//! Menu and click events are delivered on an OS event thread. The actions
//! wired in by the platform service only post work to the UI thread.

mod click;
pub mod native;

pub use click::{ClickButton, DoubleClickDetector, TrayClick};

use image::{imageops::FilterType, DynamicImage, RgbaImage};
use log::debug;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::Settings;
use crate::error::{PlatformError, Result};
use crate::util;

/// Menu item identifiers
pub const MENU_ID_SHOW: &str = "show";
pub const MENU_ID_EXIT: &str = "exit";

/// Tooltip shown until the application reports its real status
pub const INITIAL_TOOLTIP: &str = "Initializing tooltip";

/// Callback bound to a tray interaction
pub type TrayAction = Arc<dyn Fn() + Send + Sync>;

/// Where an image is loaded from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image bundled into the binary
    Embedded {
        name: &'static str,
        bytes: &'static [u8],
    },
    /// Image file on disk
    File(PathBuf),
}

impl ImageSource {
    /// Human readable location for logs and errors
    pub fn describe(&self) -> String {
        match self {
            Self::Embedded { name, .. } => format!("embedded:{name}"),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// RGBA pixels for the tray icon
#[derive(Debug, Clone)]
pub struct TrayImage {
    image: RgbaImage,
}

impl TrayImage {
    /// Decode an image
    pub fn load(source: &ImageSource) -> Result<Self> {
        let decoded = match source {
            ImageSource::Embedded { bytes, .. } => image::load_from_memory(bytes),
            ImageSource::File(path) => image::open(path),
        }
        .map_err(|e| {
            PlatformError::external("Loading tray image", format!("{}: {e}", source.describe()))
        })?;

        Ok(Self::from_image(decoded))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgba8(),
        }
    }

    /// Scale to the square size the tray expects
    pub fn auto_sized(self, size: u32) -> Self {
        if self.image.dimensions() == (size, size) {
            return self;
        }
        Self {
            image: image::imageops::resize(&self.image, size, size, FilterType::Lanczos3),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn rgba(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Entry in the tray context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayMenuItem {
    pub id: &'static str,
    pub label: &'static str,
}

const MENU: [TrayMenuItem; 2] = [
    TrayMenuItem {
        id: MENU_ID_SHOW,
        label: "Show",
    },
    TrayMenuItem {
        id: MENU_ID_EXIT,
        label: "Exit",
    },
];

/// The application's tray icon
pub struct TrayIcon {
    image: TrayImage,
    tooltip: Mutex<String>,
    tooltip_limit: usize,
    clicks: Mutex<DoubleClickDetector>,
    open_action: TrayAction,
    exit_action: TrayAction,
}

impl TrayIcon {
    /// Wire up a tray icon.
    ///
    /// `open_action` runs for `Show` and for double clicks, `exit_action` for
    /// `Exit`. Building the icon does not run either of them.
    pub fn new(
        image: TrayImage,
        settings: &Settings,
        open_action: TrayAction,
        exit_action: TrayAction,
    ) -> Self {
        Self {
            image,
            tooltip: Mutex::new(INITIAL_TOOLTIP.to_string()),
            tooltip_limit: settings.tooltip_limit,
            clicks: Mutex::new(DoubleClickDetector::new(settings.double_click_window)),
            open_action,
            exit_action,
        }
    }

    pub fn image(&self) -> &TrayImage {
        &self.image
    }

    pub fn menu(&self) -> &'static [TrayMenuItem] {
        &MENU
    }

    pub fn tooltip(&self) -> String {
        self.tooltip
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Update the tooltip, truncating it to what the OS can display
    pub fn set_tooltip(&self, text: &str) {
        *self.tooltip.lock().unwrap_or_else(PoisonError::into_inner) =
            util::truncate(text, self.tooltip_limit);
    }

    /// Dispatch a menu selection. Returns `false` for unknown items.
    pub fn handle_menu_event(&self, id: &str) -> bool {
        match id {
            MENU_ID_SHOW => (self.open_action)(),
            MENU_ID_EXIT => (self.exit_action)(),
            other => {
                debug!("Ignoring unknown tray menu item {other:?}");
                return false;
            }
        }
        true
    }

    /// Feed a click on the icon. Returns `true` if it completed a double
    /// click and the window is being brought to front.
    pub fn handle_click(&self, click: TrayClick) -> bool {
        let double = self
            .clicks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .register(click);
        if double {
            (self.open_action)();
        }
        double
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    fn counting_action() -> (TrayAction, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let action: TrayAction = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (action, count)
    }

    fn tray() -> (TrayIcon, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let (open, opens) = counting_action();
        let (exit, exits) = counting_action();
        let image = TrayImage::from_image(DynamicImage::new_rgba8(4, 4));
        (TrayIcon::new(image, &Settings::default(), open, exit), opens, exits)
    }

    #[test]
    fn test_menu_has_show_and_exit() {
        let (tray, _, _) = tray();
        let labels: Vec<_> = tray.menu().iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["Show", "Exit"]);
    }

    #[test]
    fn test_building_runs_no_action() {
        let (tray, opens, exits) = tray();
        assert_eq!(tray.tooltip(), INITIAL_TOOLTIP);
        assert_eq!(opens.load(Ordering::SeqCst), 0);
        assert_eq!(exits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_menu_dispatch() {
        let (tray, opens, exits) = tray();
        assert!(tray.handle_menu_event(MENU_ID_SHOW));
        assert!(tray.handle_menu_event(MENU_ID_EXIT));
        assert!(!tray.handle_menu_event("about"));
        assert_eq!(opens.load(Ordering::SeqCst), 1);
        assert_eq!(exits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_double_click_opens_once() {
        let (tray, opens, _) = tray();
        let base = Instant::now();
        assert!(!tray.handle_click(TrayClick::new(ClickButton::Primary, base)));
        assert!(tray.handle_click(TrayClick::new(
            ClickButton::Primary,
            base + Duration::from_millis(150)
        )));
        assert_eq!(opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stale_single_click_does_not_pair() {
        let (tray, opens, _) = tray();
        let base = Instant::now();
        let fired: Vec<_> = [0, 2_000, 2_100]
            .into_iter()
            .map(|ms| {
                tray.handle_click(TrayClick::new(
                    ClickButton::Primary,
                    base + Duration::from_millis(ms),
                ))
            })
            .collect();
        assert_eq!(fired, vec![false, false, true]);
        assert_eq!(opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_single_and_secondary_clicks_ignored() {
        let (tray, opens, exits) = tray();
        tray.handle_click(TrayClick::now(ClickButton::Primary));
        let base = Instant::now() + Duration::from_secs(5);
        tray.handle_click(TrayClick::new(ClickButton::Secondary, base));
        tray.handle_click(TrayClick::new(
            ClickButton::Secondary,
            base + Duration::from_millis(10),
        ));
        assert_eq!(opens.load(Ordering::SeqCst), 0);
        assert_eq!(exits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_tooltip_is_truncated() {
        let (tray, _, _) = tray();
        tray.set_tooltip(&"x".repeat(300));
        assert_eq!(tray.tooltip().chars().count(), 127);

        tray.set_tooltip("Uploaded 3 replays");
        assert_eq!(tray.tooltip(), "Uploaded 3 replays");
    }

    #[test]
    fn test_image_auto_sizes() {
        let image = TrayImage::from_image(DynamicImage::new_rgba8(64, 64)).auto_sized(16);
        assert_eq!((image.width(), image.height()), (16, 16));
        assert_eq!(image.rgba().len(), 16 * 16 * 4);
    }

    #[test]
    fn test_missing_image_file_fails() {
        let source = ImageSource::File(PathBuf::from("/nonexistent/tray.png"));
        let err = TrayImage::load(&source).unwrap_err();
        assert!(matches!(err, PlatformError::ExternalActionFailed { .. }));
        assert!(err.to_string().contains("/nonexistent/tray.png"));
    }

    #[test]
    fn test_garbage_embedded_image_fails() {
        let source = ImageSource::Embedded {
            name: "broken.png",
            bytes: b"not a png",
        };
        assert!(TrayImage::load(&source).is_err());
    }
}
