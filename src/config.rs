//! Settings file, environment overrides and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::constants::paths::{DEFAULT_CAMHW_OUTPUT, DEFAULT_JSON_OUTPUT, DEFAULT_TEMPLATE};
use crate::types::ScreenGeometry;

/// Settings saved to the TOML config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display width used for viewfinder fitting
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// Display height used for viewfinder fitting
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    /// Hardware configuration template to substitute
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    #[serde(default = "default_json_output")]
    pub json_output: PathBuf,

    #[serde(default = "default_camhw_output")]
    pub camhw_output: PathBuf,

    /// trace, debug, info, warn or error (LOG_LEVEL env var wins)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_screen_width() -> u32 {
    1080
}

fn default_screen_height() -> u32 {
    1920
}

fn default_template_path() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE)
}

fn default_json_output() -> PathBuf {
    PathBuf::from(DEFAULT_JSON_OUTPUT)
}

fn default_camhw_output() -> PathBuf {
    PathBuf::from(DEFAULT_CAMHW_OUTPUT)
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            template_path: default_template_path(),
            json_output: default_json_output(),
            camhw_output: default_camhw_output(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    pub fn screen(&self) -> ScreenGeometry {
        ScreenGeometry::new(self.screen_width, self.screen_height)
    }

    /// Load settings from `path`
    ///
    /// A missing file is generated from defaults so the user has something to
    /// edit. A file that does not parse is an error and is left untouched.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let mut settings = Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            settings.apply_env_overrides();
            settings.validate_and_clamp();
            return Ok(settings);
        }

        let mut settings = Self::default();
        if let Err(e) = settings.save(path) {
            error!(error = ?e, "Failed to save config");
        } else {
            info!(path = %path.display(), "Generated config file for user to edit (env vars still override)");
        }
        settings.apply_env_overrides();
        settings.validate_and_clamp();
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid config TOML")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file to {}", path.display()))?;
        Ok(())
    }

    /// Keep values within sane bounds, warning about every correction
    pub fn validate_and_clamp(&mut self) {
        use crate::constants::validation::*;

        if self.screen_width < MIN_SCREEN_DIMENSION {
            warn!(screen_width = self.screen_width, using = default_screen_width(), "screen_width below minimum, using default");
            self.screen_width = default_screen_width();
        } else if self.screen_width > MAX_SCREEN_DIMENSION {
            warn!(screen_width = self.screen_width, max = MAX_SCREEN_DIMENSION, "screen_width exceeds maximum, clamping");
            self.screen_width = MAX_SCREEN_DIMENSION;
        }

        if self.screen_height < MIN_SCREEN_DIMENSION {
            warn!(screen_height = self.screen_height, using = default_screen_height(), "screen_height below minimum, using default");
            self.screen_height = default_screen_height();
        } else if self.screen_height > MAX_SCREEN_DIMENSION {
            warn!(screen_height = self.screen_height, max = MAX_SCREEN_DIMENSION, "screen_height exceeds maximum, clamping");
            self.screen_height = MAX_SCREEN_DIMENSION;
        }

        let level = self.log_level.to_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            self.log_level = level;
        } else {
            warn!(log_level = %self.log_level, "Unknown log_level, using info");
            self.log_level = default_log_level();
        }
    }

    fn parse_num(var: &str) -> Option<u32> {
        let s = env::var(var).ok()?;
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            u32::from_str_radix(hex, 16)
                .inspect_err(|e| error!(var = %var, error = ?e, "failed to parse hex env var"))
                .ok()
        } else {
            s.parse::<u32>()
                .inspect_err(|e| error!(var = %var, error = ?e, "failed to parse env var"))
                .ok()
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(width) = Self::parse_num("CAMRES_SCREEN_WIDTH") {
            self.screen_width = width;
        }
        if let Some(height) = Self::parse_num("CAMRES_SCREEN_HEIGHT") {
            self.screen_height = height;
        }
        if let Ok(template) = env::var("CAMRES_TEMPLATE") {
            self.template_path = PathBuf::from(template);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = Settings::from_toml("screen_width = 720\nscreen_height = 1280\n").unwrap();
        assert_eq!(settings.screen(), ScreenGeometry::new(720, 1280));
        assert_eq!(settings.template_path, PathBuf::from(DEFAULT_TEMPLATE));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(Settings::from_toml("screen_width = \"wide\"").is_err());
    }

    #[test]
    fn test_validate_and_clamp() {
        let mut settings = Settings {
            screen_width: 0,
            screen_height: 100_000,
            log_level: "LOUD".to_string(),
            ..Settings::default()
        };
        settings.validate_and_clamp();
        assert_eq!(settings.screen_width, 1080);
        assert_eq!(settings.screen_height, crate::constants::validation::MAX_SCREEN_DIMENSION);
        assert_eq!(settings.log_level, "info");

        let mut settings = Settings {
            log_level: "DEBUG".to_string(),
            ..Settings::default()
        };
        settings.validate_and_clamp();
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("camres.toml");
        let settings = Settings {
            screen_width: 1440,
            screen_height: 2560,
            json_output: PathBuf::from("/tmp/modes.json"),
            ..Settings::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::from_toml(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_generates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camres.toml");
        let loaded = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(loaded.template_path, Settings::default().template_path);
    }

    #[test]
    fn test_load_keeps_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camres.toml");
        fs::write(&path, "screen_width = [").unwrap();
        assert!(Settings::load(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "screen_width = [");
    }
}
