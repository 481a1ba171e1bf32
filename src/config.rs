//! Configuration for terminal output.
//!
//! Layered the usual way:
//! - Default values
//! - `.ttylog/settings.toml`, searched from the current directory upwards
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `TTYLOG_` and use double
//! underscores to separate nested levels:
//! - `TTYLOG_PRINTER__LEVEL=debug` sets `printer.level`
//! - `TTYLOG_PRINTER__FALLBACK_WIDTH=120` sets `printer.fallback_width`
//! - `TTYLOG_LOGGING__ADD_SOURCE=true` sets `logging.add_source`

use crate::error::{TuiError, TuiResult};
use crate::io::kv::{DEFAULT_INDENT, Layout};
use crate::io::level::Severity;
use crate::io::spinner::Preset;
use crate::terminal::DEFAULT_WIDTH;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".ttylog";
pub const SETTINGS_FILE: &str = "settings.toml";
pub const ENV_PREFIX: &str = "TTYLOG_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Logging backend settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Key-value printer settings
    #[serde(default)]
    pub printer: PrinterConfig,

    /// Spinner settings
    #[serde(default)]
    pub spinner: SpinnerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `ttylog = "debug"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,

    /// Include file and line of the call site
    #[serde(default)]
    pub add_source: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PrinterConfig {
    /// Minimum severity that produces output
    #[serde(default)]
    pub level: Severity,

    /// Spaces before every key-value row
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Width used when no terminal is attached
    #[serde(default = "default_fallback_width")]
    pub fallback_width: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SpinnerConfig {
    /// Animation used by the CLI
    #[serde(default)]
    pub preset: Preset,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_indent() -> usize {
    DEFAULT_INDENT
}
fn default_fallback_width() -> usize {
    DEFAULT_WIDTH
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            logging: LoggingConfig::default(),
            printer: PrinterConfig::default(),
            spinner: SpinnerConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: BTreeMap::new(),
            add_source: false,
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            level: Severity::default(),
            indent: default_indent(),
            fallback_width: default_fallback_width(),
        }
    }
}

impl PrinterConfig {
    pub fn layout(&self) -> Layout {
        Layout {
            indent: self.indent,
            fallback_width: self.fallback_width.max(1),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> TuiResult<Self> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE));
        Self::load_layered(config_path, ENV_PREFIX)
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> TuiResult<Self> {
        Self::load_layered(path, ENV_PREFIX)
    }

    fn load_layered(path: impl AsRef<Path>, env_prefix: &str) -> TuiResult<Self> {
        let settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore (__) separates nested levels
            .merge(Env::prefixed(env_prefix).split("__"))
            .extract()?;
        Ok(settings)
    }

    /// Find `.ttylog/settings.toml` from the current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(SETTINGS_FILE))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> TuiResult<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string =
            toml::to_string_pretty(self).map_err(|e| TuiError::Config(e.to_string()))?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file in the current directory
    pub fn init_config_file(force: bool) -> TuiResult<PathBuf> {
        let config_path = PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE);
        Self::init_config_at(&config_path, force)?;
        Ok(config_path)
    }

    /// Write default settings to `path`, refusing to overwrite unless `force` is set
    pub fn init_config_at(path: &Path, force: bool) -> TuiResult<()> {
        if !force && path.exists() {
            return Err(TuiError::Config(format!(
                "{} already exists. Use --force to overwrite",
                path.display()
            )));
        }
        Settings::default().save(path)?;
        tracing::info!("wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Render as TOML for display
    pub fn to_toml(&self) -> TuiResult<String> {
        toml::to_string_pretty(self).map_err(|e| TuiError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.logging.default, "warn");
        assert_eq!(settings.printer.level, Severity::Info);
        assert_eq!(settings.printer.indent, 12);
        assert_eq!(settings.printer.fallback_width, 80);
        assert_eq!(settings.spinner.preset, Preset::Dots);
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2

[logging]
default = "info"
add_source = true

[logging.modules]
ttylog = "debug"

[printer]
level = "warn"
indent = 4
fallback_width = 100

[spinner]
preset = "monkeys"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.logging.default, "info");
        assert!(settings.logging.add_source);
        assert_eq!(settings.logging.modules["ttylog"], "debug");
        assert_eq!(settings.printer.level, Severity::Warn);
        assert_eq!(
            settings.printer.layout(),
            Layout {
                indent: 4,
                fallback_width: 100
            }
        );
        assert_eq!(settings.spinner.preset, Preset::Monkeys);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        fs::write(&config_path, "[printer]\nlevel = \"debug\"\n").unwrap();

        let settings = Settings::load_from(&config_path).unwrap();

        // Modified values
        assert_eq!(settings.printer.level, Severity::Debug);

        // Default values should still be present
        assert_eq!(settings.version, 1);
        assert_eq!(settings.printer.indent, DEFAULT_INDENT);
        assert_eq!(settings.spinner.preset, Preset::Dots);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[printer]\nlevel = \"loud\"\n").unwrap();

        let err = Settings::load_from(&config_path).unwrap_err();
        assert!(matches!(err, TuiError::Config(_)));
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.printer.fallback_width = 132;
        settings.spinner.preset = Preset::Runner;

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.printer.fallback_width, 132);
        assert_eq!(loaded.spinner.preset, Preset::Runner);
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_DIR).join(SETTINGS_FILE);

        Settings::init_config_at(&config_path, false).unwrap();
        assert!(config_path.exists());
        assert!(Settings::init_config_at(&config_path, false).is_err());
        Settings::init_config_at(&config_path, true).unwrap();
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[printer]\nindent = 8\nlevel = \"info\"\n").unwrap();

        // Private prefix so parallel tests never observe these variables
        let prefix = "TTYLOG_ENV_TEST_";
        unsafe {
            std::env::set_var("TTYLOG_ENV_TEST_PRINTER__LEVEL", "error");
            std::env::set_var("TTYLOG_ENV_TEST_LOGGING__ADD_SOURCE", "true");
        }

        let settings = Settings::load_layered(&config_path, prefix).unwrap();

        // Environment variable should override config file
        assert_eq!(settings.printer.level, Severity::Error);
        // Config file value should be used when no env var
        assert_eq!(settings.printer.indent, 8);
        // Env var adds new value not in config
        assert!(settings.logging.add_source);

        unsafe {
            std::env::remove_var("TTYLOG_ENV_TEST_PRINTER__LEVEL");
            std::env::remove_var("TTYLOG_ENV_TEST_LOGGING__ADD_SOURCE");
        }
    }
}
