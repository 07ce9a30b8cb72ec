use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// First tab at startup, new tabs and go-home.
    pub homepage: String,
    /// Rewriting relay endpoint; every page load goes through it.
    pub relay_base: String,
    pub favicon_service: String,
    pub max_closed_tabs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            homepage: "https://duckduckgo.com".to_string(),
            relay_base: "http://127.0.0.1:8787".to_string(),
            favicon_service: "https://icons.duckduckgo.com/ip3".to_string(),
            max_closed_tabs: 25,
        }
    }
}

impl Settings {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&Settings::path_in(dir.path())), Settings::default());
    }

    #[test]
    fn test_full_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = Settings::path_in(dir.path());

        let mut settings = Settings::default();
        settings.relay_base = "https://relay.test".to_string();
        settings.max_closed_tabs = 3;
        fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = Settings::path_in(dir.path());
        fs::write(&path, r#"{"homepage": "https://home.test"}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.homepage, "https://home.test");
        assert_eq!(settings.relay_base, Settings::default().relay_base);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = Settings::path_in(dir.path());
        fs::write(&path, "{ nope").unwrap();

        assert_eq!(Settings::load(&path), Settings::default());
    }
}
