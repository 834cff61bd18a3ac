//! RON config loader
//!
//! Loads the stack rules from `stacking.ron`, falling back to the built-in
//! defaults when the file is missing or cannot be parsed.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stacking::CapacityPolicy;

/// File name of the rules file
pub const CONFIG_FILE: &str = "stacking.ron";

/// Stack rules as written by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackerConfig {
    /// Material name -> target stack size, in file order.
    /// Values are kept raw so out-of-range entries can be reported.
    #[serde(default)]
    pub items: IndexMap<String, i64>,
}

impl Default for StackerConfig {
    fn default() -> Self {
        let items = [
            ("ENDER_PEARL", 64),
            ("SNOWBALL", 64),
            ("EGG", 64),
            ("HONEY_BOTTLE", 64),
            ("OAK_SIGN", 64),
            ("WHITE_BANNER", 64),
            ("POTION", 16),
            ("MUSHROOM_STEW", 16),
            ("WATER_BUCKET", 16),
            ("ENCHANTED_BOOK", 16),
            ("SADDLE", 8),
            ("CAKE", 8),
        ]
        .into_iter()
        .map(|(name, size)| (name.to_string(), size))
        .collect();

        Self { items }
    }
}

impl StackerConfig {
    /// Config with no rules at all
    pub fn empty() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Validate the rules into a policy table
    pub fn policy(&self) -> CapacityPolicy {
        CapacityPolicy::from_entries(self.items.iter().map(|(name, size)| (name.as_str(), *size)))
    }
}

/// Config file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Default location of the rules file
pub fn default_config_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("net", "stackwright", "Stackwright") {
        proj_dirs.config_dir().join(CONFIG_FILE)
    } else {
        // Fallback to current directory
        PathBuf::from(CONFIG_FILE)
    }
}

/// Read and parse a rules file
pub fn load_config(path: &Path) -> Result<StackerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = ron::from_str(&content)?;
    Ok(config)
}

/// Load a rules file, using the defaults if it is missing or broken
pub fn load_or_default(path: &Path) -> StackerConfig {
    if !path.exists() {
        log::info!("No {} at {}; using default rules", CONFIG_FILE, path.display());
        return StackerConfig::default();
    }

    match load_config(path) {
        Ok(config) => {
            log::info!("Loaded {} rule(s) from {}", config.items.len(), path.display());
            config
        }
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            StackerConfig::default()
        }
    }
}

/// Write a config to `path`, creating parent directories as needed
pub fn save_config(config: &StackerConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let ron = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())?;
    fs::write(path, ron)?;
    Ok(())
}

/// Export the built-in rules so they can be edited
pub fn export_default_config(path: &Path) -> Result<(), ConfigError> {
    save_config(&StackerConfig::default(), path)?;
    log::info!("Exported default rules to {}", path.display());
    Ok(())
}
