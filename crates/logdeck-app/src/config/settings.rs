//! Settings parser for .logdeck/config.toml

use super::types::ViewerSettings;
use logdeck_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const LOGDECK_DIR: &str = ".logdeck";

/// Path of the settings file below `base_path`
pub fn config_path(base_path: &Path) -> PathBuf {
    base_path.join(LOGDECK_DIR).join(CONFIG_FILENAME)
}

/// Load settings from .logdeck/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(base_path: &Path) -> ViewerSettings {
    let config_path = config_path(base_path);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return ViewerSettings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                ViewerSettings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            ViewerSettings::default()
        }
    }
}

/// Create the default config file in .logdeck/ if it is missing
pub fn init_config_dir(base_path: &Path) -> Result<()> {
    let logdeck_dir = base_path.join(LOGDECK_DIR);

    if !logdeck_dir.exists() {
        std::fs::create_dir_all(&logdeck_dir)
            .map_err(|e| Error::config(format!("Failed to create .logdeck dir: {}", e)))?;
        info!("Created .logdeck directory");
    }

    let config_path = logdeck_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config.toml");
    }

    Ok(())
}

fn generate_default_config() -> String {
    r#"# logdeck viewer configuration

[filter]
default_levels = ["INFO", "WARN", "ERROR"]   # DEBUG starts unchecked

[tree]
overflow_threshold = 10     # Sessions listed directly under "Today"
week_window_days = 7        # Older sessions go to "Archive"

[search]
mode = "substring"          # substring | token | regex
case_sensitive = false

[display]
hide_message_when_expanded = false
"#
    .to_string()
}
