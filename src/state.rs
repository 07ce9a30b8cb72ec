// Shared state for the desktop shell, managed by Tauri.

use std::sync::Mutex;

use crate::desktop::surface::WebviewHost;
use crate::modules::browser::Browser;
use crate::modules::relay::RelayClient;

pub struct AppState {
    pub browser: Mutex<Browser<WebviewHost>>,
    /// Same relay the browser wraps URLs with; used to decide which loaded
    /// documents may be introspected for a title.
    pub relay: RelayClient,
    pub http: reqwest::blocking::Client,
}
