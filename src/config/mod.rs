use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "marklens";
const WIDGET_CONFIG_FILE: &str = "widget.json";

const DEFAULT_MIN_MARKING_SIZE: f64 = 30.0;

/// Widget-level settings from `widget.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetConfig {
    /// Smallest marking side the commit step will accept, in original-image
    /// pixels. Matches the minimum the drag/resize interaction layer
    /// enforces on screen.
    #[serde(default = "default_min_marking_size")]
    pub min_marking_size: f64,
    /// Whether deleting selected markings asks for confirmation first.
    #[serde(default = "default_confirm_deletes")]
    pub confirm_deletes: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            min_marking_size: DEFAULT_MIN_MARKING_SIZE,
            confirm_deletes: true,
        }
    }
}

fn default_min_marking_size() -> f64 {
    DEFAULT_MIN_MARKING_SIZE
}

fn default_confirm_deletes() -> bool {
    true
}

pub fn load_widget_config() -> WidgetConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_widget_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_widget_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> WidgetConfig {
    let path = match widget_config_path(APP_DIR, WIDGET_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return WidgetConfig::default(),
    };
    if !path.exists() {
        return WidgetConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse widget.json; using defaults");
            WidgetConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read widget.json; using defaults");
            WidgetConfig::default()
        }
    }
}

fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn widget_config_path(
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
