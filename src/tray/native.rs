//! Native tray entry backed by the `tray-icon` crate
//!
//! Must be created on the main thread after the event loop has started
//! (required on macOS). Event handlers forward into the [`TrayIcon`] model.

use log::{debug, warn};
use std::sync::Arc;
use tray_icon::{
    menu::{Menu, MenuEvent, MenuItem},
    Icon, MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent,
};

use super::{ClickButton, TrayClick, TrayIcon};
use crate::error::{PlatformError, Result};

/// OS-level tray entry; removed from the notification area when dropped
pub struct NativeTray {
    handle: tray_icon::TrayIcon,
}

impl NativeTray {
    /// Put `tray` into the notification area and route its events.
    ///
    /// `as_template` marks the image as a macOS template (monochrome) image.
    pub fn install(tray: &Arc<TrayIcon>, as_template: bool) -> Result<Self> {
        let menu = Menu::new();
        for item in tray.menu() {
            menu.append(&MenuItem::with_id(item.id, item.label, true, None))
                .map_err(|e| PlatformError::external("Building tray menu", e))?;
        }

        let image = tray.image();
        let icon = Icon::from_rgba(image.rgba().to_vec(), image.width(), image.height())
            .map_err(|e| PlatformError::external("Creating tray icon", e))?;

        let handle = TrayIconBuilder::new()
            .with_icon(icon)
            .with_icon_as_template(as_template)
            .with_menu(Box::new(menu))
            .with_tooltip(tray.tooltip())
            .build()
            .map_err(|e| PlatformError::external("Creating tray icon", e))?;

        let menu_target = Arc::clone(tray);
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            debug!("Tray menu event: {}", event.id.0);
            menu_target.handle_menu_event(event.id.0.as_str());
        }));

        let click_target = Arc::clone(tray);
        TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
            if let Some(click) = click_from_event(&event) {
                click_target.handle_click(click);
            }
        }));

        Ok(Self { handle })
    }

    /// Push the model's current tooltip to the OS
    pub fn sync_tooltip(&self, tray: &TrayIcon) {
        if let Err(e) = self.handle.set_tooltip(Some(tray.tooltip())) {
            warn!("Failed to update tray tooltip: {e}");
        }
    }
}

impl Drop for NativeTray {
    fn drop(&mut self) {
        MenuEvent::set_event_handler(None::<fn(MenuEvent)>);
        TrayIconEvent::set_event_handler(None::<fn(TrayIconEvent)>);
    }
}

/// Completed clicks only; the native Windows double-click event is ignored
/// because pairs of clicks are detected by the model itself.
fn click_from_event(event: &TrayIconEvent) -> Option<TrayClick> {
    match event {
        TrayIconEvent::Click {
            button,
            button_state: MouseButtonState::Up,
            ..
        } => {
            let button = match button {
                MouseButton::Left => ClickButton::Primary,
                MouseButton::Right => ClickButton::Secondary,
                MouseButton::Middle => ClickButton::Middle,
            };
            Some(TrayClick::now(button))
        }
        _ => None,
    }
}
