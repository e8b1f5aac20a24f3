//! Windows platform implementation
//!
//! Application data lives in the roaming profile; the game keeps its
//! accounts under the user's Documents folder.

use std::path::Path;
use std::sync::Arc;

use super::{open_uri, ApplicationDirectories, PlatformContext, PlatformService, LOGO};
use crate::error::Result;
use crate::temp_dirs::BattleLobbyTempDirectories;
use crate::tray::{ImageSource, TrayIcon};
use crate::window::MainWindow;

/// Windows platform implementation
pub struct WindowsPlatform {
    context: PlatformContext,
    directories: ApplicationDirectories,
    lobby_directories: BattleLobbyTempDirectories,
}

impl WindowsPlatform {
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

    /// `%APPDATA%\<app>` and `Documents\Heroes of the Storm\Accounts`
    pub fn resolve_directories(home: &Path, directory_name: &str) -> ApplicationDirectories {
        ApplicationDirectories {
            application_home: home.join("AppData").join("Roaming").join(directory_name),
            hots_home: home
                .join("Documents")
                .join("Heroes of the Storm")
                .join("Accounts"),
        }
    }

    /// The game writes lobby files below `%TEMP%\Heroes of the Storm`
    pub fn lobby_directories(temp: &Path) -> BattleLobbyTempDirectories {
        BattleLobbyTempDirectories::new(temp, "Heroes of the Storm")
    }
}

impl PlatformService for WindowsPlatform {
    fn name(&self) -> &'static str {
        "Windows"
    }

    fn context(&self) -> &PlatformContext {
        &self.context
    }

    fn directories(&self) -> &ApplicationDirectories {
        &self.directories
    }

    fn get_tray_icon(&self, window: &Arc<dyn MainWindow>) -> Result<Arc<TrayIcon>> {
        self.context
            .tray_icon_or_try_init(|| self.build_tray_icon(self.logo(), window))
    }

    fn tray_icon_size(&self) -> u32 {
        16
    }

    fn browse(&self, uri: &str) -> Result<()> {
        open_uri(uri)
    }

    fn logo(&self) -> &'static ImageSource {
        &LOGO
    }

    fn is_preloader_supported(&self) -> bool {
        true
    }

    fn battle_lobby_temp_directories(&self) -> &BattleLobbyTempDirectories {
        &self.lobby_directories
    }
}
