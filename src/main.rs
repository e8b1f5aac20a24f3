//! HotS Replay Uploader - platform debug tool
//!
//! Prints what the platform layer resolves on this machine without opening
//! any window. Pass a URI to also try opening it.

use anyhow::Result;
use hots_replay_uploader::config::Settings;
use hots_replay_uploader::platform;
use hots_replay_uploader::tray::TrayImage;
use hots_replay_uploader::ui::TaskQueue;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let settings = Settings::from_env();
    println!("🎮 {} - Platform Debug", settings.application_name);
    println!("==================================\n");

    let queue = Arc::new(TaskQueue::new());
    let service = match platform::create(settings.clone(), queue.clone()) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            return Err(e.into());
        }
    };

    println!("Platform:           {}", service.name());
    println!("Application home:   {}", exists_marker(service.application_home()));
    println!("HotS home:          {}", exists_marker(service.hots_home()));
    println!(
        "Battle lobby root:  {}",
        service.battle_lobby_temp_directories().lobby_root().display()
    );
    println!(
        "Preloader:          {}",
        if service.is_preloader_supported() { "supported" } else { "not supported" }
    );
    println!("Double-click window: {:?}", settings.double_click_window);

    match TrayImage::load(service.logo()) {
        Ok(logo) => println!("Logo:               {}x{}", logo.width(), logo.height()),
        Err(e) => println!("Logo:               ❌ {e}"),
    }

    if let Some(uri) = std::env::args().nth(1) {
        match service.browse(&uri) {
            Ok(()) => println!("\n✅ Opened {uri}"),
            Err(e) => println!("\n❌ {e}"),
        }
    }

    service.shutdown();
    println!("\nShutdown requested: {}", queue.exit_requested());
    Ok(())
}

fn exists_marker(path: &std::path::Path) -> String {
    let marker = if path.exists() { "✅" } else { "⚠️  (missing)" };
    format!("{} {marker}", path.display())
}
