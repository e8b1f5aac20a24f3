//! Location of the game's transient battle lobby files
//!
//! Heroes of the Storm writes a `replay.server.battlelobby` file into a
//! temporary directory while a match loads. The watcher that picks it up is
//! owned elsewhere; the platform service only hands out where to look.

use std::path::{Path, PathBuf};

/// Temp root plus the game-specific remainder below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleLobbyTempDirectories {
    root: PathBuf,
    remainder: PathBuf,
}

impl BattleLobbyTempDirectories {
    pub fn new(root: impl Into<PathBuf>, remainder: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            remainder: remainder.into(),
        }
    }

    /// Directory the watcher should be attached to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path below the root in which the game creates its lobby directories
    pub fn remainder(&self) -> &Path {
        &self.remainder
    }

    /// Full directory holding the lobby folders
    pub fn lobby_root(&self) -> PathBuf {
        self.root.join(&self.remainder)
    }
}
