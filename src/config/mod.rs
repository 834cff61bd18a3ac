//! Configuration
//!
//! Stack rules are kept in an external RON file, with a built-in fallback.

pub mod loader;

pub use loader::{
    StackerConfig, ConfigError,
    load_config, load_or_default, save_config, export_default_config,
    default_config_path, CONFIG_FILE,
};
