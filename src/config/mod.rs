use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::storage::DEFAULT_PREFERENCE_KEY;
use crate::theme::DARK_MARKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

pub(crate) const APP_DIR: &str = "modeswitch";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Key the explicit preference is stored under.
    #[serde(default)]
    pub storage_key: Option<String>,
    /// CSS class toggled on the root widget.
    #[serde(default)]
    pub marker: Option<String>,
    /// Ambient value assumed when no display settings are available.
    #[serde(default)]
    pub fallback_dark: Option<bool>,
}

impl AppConfig {
    pub fn storage_key(&self) -> &str {
        non_empty(self.storage_key.as_deref()).unwrap_or(DEFAULT_PREFERENCE_KEY)
    }

    pub fn marker(&self) -> &str {
        non_empty(self.marker.as_deref()).unwrap_or(DARK_MARKER)
    }

    pub fn fallback_dark(&self) -> bool {
        self.fallback_dark.unwrap_or(false)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("modeswitch-config-{pid}-{nanos}"));
        path
    }

    fn write_config(root: &Path, contents: &str) {
        let path = app_config_path(APP_DIR, APP_CONFIG_FILE, Some(root), None).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn missing_config_uses_defaults() {
        let root = fixture_root();
        let config = load_app_config_with(Some(&root), None);
        assert_eq!(config.storage_key(), DEFAULT_PREFERENCE_KEY);
        assert_eq!(config.marker(), DARK_MARKER);
        assert!(!config.fallback_dark());
    }

    #[test]
    fn config_overrides_are_read() {
        let root = fixture_root();
        write_config(
            &root,
            r#"{"storage_key": "ui-theme", "marker": "night", "fallback_dark": true}"#,
        );

        let config = load_app_config_with(Some(&root), None);
        assert_eq!(config.storage_key(), "ui-theme");
        assert_eq!(config.marker(), "night");
        assert!(config.fallback_dark());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn blank_overrides_fall_back_to_defaults() {
        let root = fixture_root();
        write_config(&root, r#"{"storage_key": "  ", "marker": ""}"#);

        let config = load_app_config_with(Some(&root), None);
        assert_eq!(config.storage_key(), DEFAULT_PREFERENCE_KEY);
        assert_eq!(config.marker(), DARK_MARKER);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn invalid_config_uses_defaults() {
        let root = fixture_root();
        write_config(&root, "{not json");

        let config = load_app_config_with(Some(&root), None);
        assert!(config.storage_key.is_none());
        let _ = fs::remove_dir_all(&root);
    }
}
