// Tauri shell: one child webview per session under a toolbar webview.

pub mod commands;
pub mod surface;

use std::sync::{Arc, Mutex};

use tauri::{Manager, Window};

use crate::modules::browser::Browser;
use crate::modules::list_store::JsonFileStore;
use crate::modules::relay::RelayClient;
use crate::modules::surface::SessionId;
use crate::settings::Settings;
use crate::state::AppState;
use surface::{bounds_for, WebviewHost};

pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_clipboard_manager::init())
        .setup(|app| {
            let level = if cfg!(debug_assertions) {
                log::LevelFilter::Info
            } else {
                log::LevelFilter::Warn
            };
            app.handle()
                .plugin(tauri_plugin_log::Builder::default().level(level).build())?;

            let data_dir = app.path().app_data_dir()?;
            let settings = Settings::load(&Settings::path_in(&data_dir));
            let relay = RelayClient::new(settings.relay_base.clone());
            let store = Arc::new(JsonFileStore::new(data_dir));
            let browser = Browser::new(settings, WebviewHost::new(app.handle().clone()), store);

            // Managed before the first webview exists so load callbacks find it
            app.manage(AppState {
                browser: Mutex::new(browser),
                relay,
                http: reqwest::blocking::Client::new(),
            });
            {
                let state = app.state::<AppState>();
                let mut browser = state.browser.lock().map_err(|e| e.to_string())?;
                browser.start()?;
            }

            let main_window: Window = app
                .get_window("main")
                .ok_or("main window missing from tauri.conf.json")?;
            let window = main_window.clone();
            main_window.on_window_event(move |event| {
                if let tauri::WindowEvent::Resized(new_size) = event {
                    let scale = window.scale_factor().unwrap_or(1.0);
                    let (position, size) = bounds_for(*new_size, scale);
                    for (label, webview) in window.app_handle().webviews() {
                        if SessionId::from_label(&label).is_none() {
                            continue;
                        }
                        let _ = webview.set_bounds(tauri::Rect {
                            position: tauri::Position::Physical(position),
                            size: tauri::Size::Physical(size),
                        });
                    }
                }
            });

            log::info!("[Browser] Relay browser ready");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_state,
            commands::hover_preview,
            commands::new_tab,
            commands::switch_tab,
            commands::close_tab,
            commands::reorder_tab,
            commands::navigate,
            commands::reload_active,
            commands::go_back,
            commands::go_forward,
            commands::go_home,
            commands::bookmark_active,
            commands::remove_bookmark,
            commands::clear_history,
            commands::reopen_closed_tab,
            commands::copy_active_url
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
