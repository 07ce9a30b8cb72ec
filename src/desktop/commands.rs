// Tauri commands: thin wrappers that turn UI calls into Browser commands
// and push the new render model to the toolbar.

use tauri::{AppHandle, Emitter, State};
use tauri_plugin_clipboard_manager::ClipboardExt;

use crate::modules::presentation::{Command, HoverPreview, TabStripView};
use crate::modules::surface::SessionId;
use crate::state::AppState;

pub const UPDATE_EVENT: &str = "update-tabs";

pub fn emit_update(app: &AppHandle, view: &TabStripView) {
    if let Err(e) = app.emit(UPDATE_EVENT, view) {
        log::warn!("[Commands] Failed to emit {}: {}", UPDATE_EVENT, e);
    }
}

fn apply(app: &AppHandle, state: &AppState, command: Command) -> Result<TabStripView, String> {
    let view = {
        let mut browser = state.browser.lock().map_err(|e| e.to_string())?;
        browser.dispatch(command).map_err(|e| e.to_string())?;
        browser.view()
    };
    emit_update(app, &view);
    Ok(view)
}

#[tauri::command]
pub async fn get_state(state: State<'_, AppState>) -> Result<TabStripView, String> {
    let browser = state.browser.lock().map_err(|e| e.to_string())?;
    Ok(browser.view())
}

#[tauri::command]
pub async fn hover_preview(state: State<'_, AppState>, id: SessionId) -> Result<Option<HoverPreview>, String> {
    let browser = state.browser.lock().map_err(|e| e.to_string())?;
    Ok(browser.hover_preview(id))
}

#[tauri::command]
pub async fn new_tab(app: AppHandle, state: State<'_, AppState>, url: Option<String>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::NewTab { url })
}

#[tauri::command]
pub async fn switch_tab(app: AppHandle, state: State<'_, AppState>, id: SessionId) -> Result<TabStripView, String> {
    apply(&app, &state, Command::SwitchTab { id })
}

#[tauri::command]
pub async fn close_tab(app: AppHandle, state: State<'_, AppState>, id: SessionId) -> Result<TabStripView, String> {
    apply(&app, &state, Command::CloseTab { id })
}

#[tauri::command]
pub async fn reorder_tab(
    app: AppHandle,
    state: State<'_, AppState>,
    source: SessionId,
    target: SessionId,
) -> Result<TabStripView, String> {
    log::debug!("[Tab Reorder] {} before {}", source, target);
    apply(&app, &state, Command::Reorder { source, target })
}

#[tauri::command]
pub async fn navigate(app: AppHandle, state: State<'_, AppState>, input: String) -> Result<TabStripView, String> {
    apply(&app, &state, Command::Navigate { input })
}

#[tauri::command]
pub async fn reload_active(app: AppHandle, state: State<'_, AppState>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::ReloadActive)
}

#[tauri::command]
pub async fn go_back(app: AppHandle, state: State<'_, AppState>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::Back)
}

#[tauri::command]
pub async fn go_forward(app: AppHandle, state: State<'_, AppState>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::Forward)
}

#[tauri::command]
pub async fn go_home(app: AppHandle, state: State<'_, AppState>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::GoHome)
}

#[tauri::command]
pub async fn bookmark_active(app: AppHandle, state: State<'_, AppState>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::BookmarkActive)
}

#[tauri::command]
pub async fn remove_bookmark(app: AppHandle, state: State<'_, AppState>, url: String) -> Result<TabStripView, String> {
    apply(&app, &state, Command::RemoveBookmark { url })
}

#[tauri::command]
pub async fn clear_history(app: AppHandle, state: State<'_, AppState>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::ClearHistory)
}

#[tauri::command]
pub async fn reopen_closed_tab(app: AppHandle, state: State<'_, AppState>) -> Result<TabStripView, String> {
    apply(&app, &state, Command::ReopenClosed)
}

#[tauri::command]
pub async fn copy_active_url(app: AppHandle, state: State<'_, AppState>) -> Result<(), String> {
    let url = {
        let browser = state.browser.lock().map_err(|e| e.to_string())?;
        browser.registry().active().map(|s| s.url().to_string())
    };
    if let Some(url) = url {
        app.clipboard().write_text(url).map_err(|e| e.to_string())?;
    }
    Ok(())
}
