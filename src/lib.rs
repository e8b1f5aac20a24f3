//! HotS Replay Uploader platform layer
//!
//! Hides operating-system specifics behind one [`platform::PlatformService`]:
//! where the application and the game keep their data, the system tray icon,
//! what happens when the main window is closed, opening URIs and shutting
//! down.
//!
//! One service is created per process with [`platform::create`] and shared as
//! an `Arc<dyn PlatformService>`.

pub mod config;
pub mod error;
pub mod hero;
pub mod platform;
pub mod shell;
pub mod shutdown;
pub mod temp_dirs;
pub mod tray;
pub mod ui;
pub mod util;
pub mod window;

pub use error::{PlatformError, Result};
pub use platform::{ApplicationDirectories, PlatformService};
