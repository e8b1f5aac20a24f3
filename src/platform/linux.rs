//! Linux platform implementation
//!
//! The game only runs through wine, so its files live inside the default wine
//! prefix. There is no tray integration.

use std::path::{Path, PathBuf};

use super::{open_uri, ApplicationDirectories, PlatformContext, PlatformService, LOGO};
use crate::error::Result;
use crate::temp_dirs::BattleLobbyTempDirectories;
use crate::tray::ImageSource;

/// Linux platform implementation
pub struct LinuxPlatform {
    context: PlatformContext,
    directories: ApplicationDirectories,
    lobby_directories: BattleLobbyTempDirectories,
}

impl LinuxPlatform {
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

    /// `~/.<app>` and the game's account directory in the wine prefix
    pub fn resolve_directories(home: &Path, directory_name: &str) -> ApplicationDirectories {
        ApplicationDirectories {
            application_home: home.join(format!(".{directory_name}")),
            hots_home: Self::wine_user_dir(home)
                .join("My Documents")
                .join("Heroes of the Storm")
                .join("Accounts"),
        }
    }

    /// Lobby files go to the wine user's temp directory
    pub fn lobby_directories(home: &Path) -> BattleLobbyTempDirectories {
        BattleLobbyTempDirectories::new(Self::wine_user_dir(home).join("Temp"), "Heroes of the Storm")
    }

    /// `~/.wine/drive_c/users/<user>`, where `<user>` is the home directory's name
    fn wine_user_dir(home: &Path) -> PathBuf {
        let user = home
            .file_name()
            .map_or_else(|| "root".into(), |name| name.to_string_lossy().into_owned());
        home.join(".wine").join("drive_c").join("users").join(user)
    }
}

impl PlatformService for LinuxPlatform {
    fn name(&self) -> &'static str {
        "Linux"
    }

    fn context(&self) -> &PlatformContext {
        &self.context
    }

    fn directories(&self) -> &ApplicationDirectories {
        &self.directories
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
