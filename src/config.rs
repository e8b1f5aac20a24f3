//! Application settings
//!
//! Defaults cover everything; a few values can be tuned from the environment.

use log::warn;
use std::time::Duration;

/// Product name shown to users and used to derive the data directory name
pub const APPLICATION_NAME: &str = "HotS Replay Uploader";

/// Environment variable overriding the tray double-click window (milliseconds)
pub const DOUBLE_CLICK_ENV: &str = "HOTS_UPLOADER_DOUBLE_CLICK_MS";

/// Default double-click window, matching the Windows system default
pub const DEFAULT_DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Longest tooltip accepted by the Windows notification area (128 incl. NUL)
pub const DEFAULT_TOOLTIP_LIMIT: usize = 127;

/// Runtime settings for the platform layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Product name, e.g. "HotS Replay Uploader"
    pub application_name: String,

    /// Maximum delay between two primary clicks that still counts as a double click
    pub double_click_window: Duration,

    /// Tooltip texts longer than this are truncated
    pub tooltip_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            application_name: APPLICATION_NAME.to_string(),
            double_click_window: DEFAULT_DOUBLE_CLICK_WINDOW,
            tooltip_limit: DEFAULT_TOOLTIP_LIMIT,
        }
    }
}

impl Settings {
    /// Defaults, with overrides read from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup(DOUBLE_CLICK_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => settings.double_click_window = Duration::from_millis(ms),
                _ => warn!("Ignoring invalid {DOUBLE_CLICK_ENV}={raw:?}"),
            }
        }

        settings
    }

    /// Name of the application's private data directory
    pub fn application_directory_name(&self) -> String {
        application_directory_name(&self.application_name)
    }
}

/// Derive a directory name from a product name by stripping all whitespace.
///
/// Case is preserved: "HotS Replay Uploader" becomes "HotSReplayUploader".
pub fn application_directory_name(application_name: &str) -> String {
    application_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_name_strips_spaces() {
        assert_eq!(
            application_directory_name("HotS Replay Uploader"),
            "HotSReplayUploader"
        );
    }

    #[test]
    fn test_directory_name_strips_all_whitespace() {
        assert_eq!(application_directory_name(" Tab\tNew\nLine "), "TabNewLine");
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.application_directory_name(), "HotSReplayUploader");
        assert_eq!(settings.double_click_window, Duration::from_millis(500));
    }

    #[test]
    fn test_double_click_override() {
        let settings = Settings::from_lookup(|key| {
            (key == DOUBLE_CLICK_ENV).then(|| "250".to_string())
        });
        assert_eq!(settings.double_click_window, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        for raw in ["", "abc", "0", "-5"] {
            let settings = Settings::from_lookup(|_| Some(raw.to_string()));
            assert_eq!(settings.double_click_window, DEFAULT_DOUBLE_CLICK_WINDOW);
        }
    }
}
