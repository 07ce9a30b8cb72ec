// Relay Browser Library Entry Point
// Pure logic lives under `modules` and is tested without a webview.
// The Tauri shell is behind the `desktop` feature.

pub mod error;
pub mod settings;

// Pure logic modules (no Tauri imports)
pub mod modules;

#[cfg(feature = "desktop")]
pub mod desktop;
#[cfg(feature = "desktop")]
pub mod state;

pub use error::{BrowserError, Result};
pub use modules::browser::Browser;
pub use modules::surface::SessionId;
pub use settings::Settings;

#[cfg(feature = "desktop")]
pub use desktop::run;
