use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::ui::{Theme, ThemeConfig};

const CONFIG_PATH_ENV_VAR: &str = "CALPICK_CONFIG_FILE";
const DEFAULT_TICK_RATE_MS: u64 = 500;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tick_rate: Option<u64>,
    theme: ThemeConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate: Duration::from_millis(DEFAULT_TICK_RATE_MS),
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;

        Ok(Config {
            tick_rate: Duration::from_millis(file.tick_rate.unwrap_or(DEFAULT_TICK_RATE_MS)),
            theme: Theme::from_config(&file.theme)?,
        })
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|e| {
            let msg = match &e.message {
                Some(detail) => format!("{}: {}", path.display(), detail),
                None => path.display().to_string(),
            };
            e.with_msg(&msg)
        })
    }
}

/// Candidate config files, most specific first.
pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calpick").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calpick.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first existing default location,
/// otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::from(std::io::ErrorKind::NotFound)
                .with_msg(&format!("config file {} does not exist", path.display())));
        }
        log::info!("loading config from {}", path.display());
        return Config::from_file(path);
    }

    match find_configfile_locations().into_iter().find(|p| p.exists()) {
        Some(found) => {
            log::info!("loading config from {}", found.display());
            Config::from_file(&found)
        }
        None => {
            log::info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}
