//! Configuration file parsing for logdeck
//!
//! Supports:
//! - `.logdeck/config.toml` - Viewer settings

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings};
pub use types::*;
