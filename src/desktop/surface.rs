// Session surfaces backed by child webviews of the main window.
//
// Titles are read by fetching the finished relay document again over HTTP
// rather than from the live DOM. That second request carries no webview
// cookies and repeats a GET, so pages behind a login or produced by a POST
// can report a different title than the one on screen.

use tauri::webview::{PageLoadEvent, WebviewBuilder};
use tauri::{AppHandle, Manager, PhysicalPosition, PhysicalSize, Webview, WebviewUrl, Window};
use url::Url;

use crate::desktop::commands::emit_update;
use crate::error::{BrowserError, Result};
use crate::modules::relay::RelayClient;
use crate::modules::surface::{LoadSubscription, Surface, SurfaceHost};
use crate::modules::title::document_title;
use crate::state::AppState;

/// Tab strip + address bar, in logical pixels.
pub const TOOLBAR_HEIGHT: f64 = 56.0 + 28.0;

const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Area below the toolbar, in physical pixels.
pub fn content_bounds(window: &Window) -> tauri::Result<(PhysicalPosition<i32>, PhysicalSize<u32>)> {
    let size = window.inner_size()?;
    let scale = window.scale_factor()?;
    Ok(bounds_for(size, scale))
}

pub fn bounds_for(size: PhysicalSize<u32>, scale: f64) -> (PhysicalPosition<i32>, PhysicalSize<u32>) {
    let toolbar = (TOOLBAR_HEIGHT * scale) as u32;
    let height = size.height.saturating_sub(toolbar).max(100);
    (PhysicalPosition::new(0, toolbar as i32), PhysicalSize::new(size.width, height))
}

pub struct WebviewHost {
    app: AppHandle,
}

impl WebviewHost {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl SurfaceHost for WebviewHost {
    type Surface = WebviewSurface;

    fn create(&mut self, subscription: LoadSubscription, proxied_url: &str) -> Result<WebviewSurface> {
        let url = Url::parse(proxied_url).map_err(|e| BrowserError::Surface(e.to_string()))?;
        let window = self
            .app
            .get_window("main")
            .ok_or_else(|| BrowserError::Surface("main window is gone".to_string()))?;
        let (position, size) = content_bounds(&window).map_err(|e| BrowserError::Surface(e.to_string()))?;

        let label = subscription.session().label();
        let builder = WebviewBuilder::new(label.as_str(), WebviewUrl::External(url))
            .user_agent(CHROME_USER_AGENT)
            .on_page_load(move |webview, payload| {
                if matches!(payload.event(), PageLoadEvent::Finished) {
                    on_load_finished(&webview, payload.url().clone(), subscription.clone());
                }
            });

        let webview = window
            .add_child(builder, position, size)
            .map_err(|e| BrowserError::Surface(e.to_string()))?;
        // The registry shows it on switch
        let _ = webview.hide();

        log::debug!("[Surface] Added webview {}", label);
        Ok(WebviewSurface { webview })
    }
}

pub struct WebviewSurface {
    webview: Webview,
}

impl Surface for WebviewSurface {
    fn load(&mut self, proxied_url: &str) -> Result<()> {
        let url = Url::parse(proxied_url).map_err(|e| BrowserError::Surface(e.to_string()))?;
        self.webview
            .navigate(url)
            .map_err(|e| BrowserError::Surface(e.to_string()))
    }

    fn reload(&mut self) -> Result<()> {
        self.webview
            .eval("window.location.reload()")
            .map_err(|e| BrowserError::Surface(e.to_string()))
    }

    fn set_visible(&mut self, visible: bool) {
        let result = if visible {
            self.webview.show()
        } else {
            self.webview.hide()
        };
        if let Err(e) = result {
            log::warn!("[Surface] Failed to toggle {}: {}", self.webview.label(), e);
        }
    }

    fn destroy(self) {
        if let Err(e) = self.webview.close() {
            log::warn!("[Surface] Failed to close {}: {}", self.webview.label(), e);
        }
    }
}

/// Reads the title off the main thread, then reconciles by session id.
fn on_load_finished(webview: &Webview, page_url: Url, subscription: LoadSubscription) {
    if !subscription.is_live() {
        return;
    }
    let generation = subscription.generation();
    let app = webview.app_handle().clone();

    tauri::async_runtime::spawn_blocking(move || {
        let Some(state) = app.try_state::<AppState>() else {
            return;
        };
        let probe = read_title(&state.http, &state.relay, &page_url);

        // Closed while the title was being fetched
        let Some(event) = subscription.complete_generation(generation, probe) else {
            return;
        };

        let view = match state.browser.lock() {
            Ok(mut browser) => {
                if !browser.complete_load(event) {
                    return;
                }
                browser.view()
            }
            Err(e) => {
                log::error!("[Surface] Browser state poisoned: {}", e);
                return;
            }
        };
        emit_update(&app, &view);
    });
}

/// Only relay output may be introspected; anything else is cross-origin.
fn read_title(http: &reqwest::blocking::Client, relay: &RelayClient, page_url: &Url) -> Result<String> {
    if !relay.serves(page_url) {
        return Err(BrowserError::TitleUnreadable(format!(
            "{} is not served by the relay",
            page_url
        )));
    }

    let body = http
        .get(page_url.as_str())
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|e| BrowserError::TitleUnreadable(e.to_string()))?;

    Ok(document_title(&body).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_leave_room_for_toolbar() {
        let (position, size) = bounds_for(PhysicalSize::new(1200, 800), 2.0);
        assert_eq!(position, PhysicalPosition::new(0, 168));
        assert_eq!(size, PhysicalSize::new(1200, 632));
    }

    #[test]
    fn test_bounds_have_minimum_height() {
        let (_, size) = bounds_for(PhysicalSize::new(300, 90), 1.0);
        assert_eq!(size.height, 100);
    }
}
