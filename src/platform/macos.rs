//! macOS platform implementation
//!
//! The menu bar wants a small monochrome template image instead of the
//! coloured logo. A preloader cannot be shown before the main window exists.

use std::path::Path;
use std::sync::Arc;

use super::{open_uri, ApplicationDirectories, PlatformContext, PlatformService, LOGO};
use crate::error::Result;
use crate::temp_dirs::BattleLobbyTempDirectories;
use crate::tray::{ImageSource, TrayIcon};
use crate::window::MainWindow;

/// Monochrome menu bar image
pub static TRAY_TEMPLATE: ImageSource = ImageSource::Embedded {
    name: "tray_template.png",
    bytes: include_bytes!("../../assets/tray_template.png"),
};

/// macOS platform implementation
pub struct MacOSPlatform {
    context: PlatformContext,
    directories: ApplicationDirectories,
    lobby_directories: BattleLobbyTempDirectories,
}

impl MacOSPlatform {
    pub fn new(
        context: PlatformContext,
        home: &Path,
        lobby_directories: BattleLobbyTempDirectories,
    ) -> Self {
        let directories = Self::resolve_directories(home, &context.settings().application_directory_name());
        Self {
            context,
            directories,
            lobby_directories,
        }
    }

    /// Both directories live under `~/Library/Application Support`
    pub fn resolve_directories(home: &Path, directory_name: &str) -> ApplicationDirectories {
        let support = home.join("Library").join("Application Support");
        ApplicationDirectories {
            application_home: support.join(directory_name),
            hots_home: support
                .join("Blizzard")
                .join("Heroes of the Storm")
                .join("Accounts"),
        }
    }

    /// The game writes lobby files below `$TMPDIR/Blizzard/Heroes of the Storm`
    pub fn lobby_directories(temp: &Path) -> BattleLobbyTempDirectories {
        BattleLobbyTempDirectories::new(temp, Path::new("Blizzard").join("Heroes of the Storm"))
    }
}

impl PlatformService for MacOSPlatform {
    fn name(&self) -> &'static str {
        "macOS"
    }

    fn context(&self) -> &PlatformContext {
        &self.context
    }

    fn directories(&self) -> &ApplicationDirectories {
        &self.directories
    }

    fn get_tray_icon(&self, window: &Arc<dyn MainWindow>) -> Result<Arc<TrayIcon>> {
        self.context
            .tray_icon_or_try_init(|| self.build_tray_icon(&TRAY_TEMPLATE, window))
    }

    fn tray_icon_size(&self) -> u32 {
        22
    }

    fn browse(&self, uri: &str) -> Result<()> {
        open_uri(uri)
    }

    fn logo(&self) -> &'static ImageSource {
        &LOGO
    }

    fn is_preloader_supported(&self) -> bool {
        false
    }

    fn battle_lobby_temp_directories(&self) -> &BattleLobbyTempDirectories {
        &self.lobby_directories
    }
}
