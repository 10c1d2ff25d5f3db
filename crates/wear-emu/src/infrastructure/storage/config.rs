//! TOML-based configuration for the emulator.
//!
//! Reads and writes `EmuConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\WearEmu\config.toml`
//! - Linux:    `~/.config/wear-emu/config.toml`
//! - macOS:    `~/Library/Application Support/WearEmu/config.toml`
//!
//! Every field carries a serde default so the emulator runs correctly on
//! first start (no file yet) and when loading a config written by an older
//! version that lacks newer fields.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level emulator configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmuConfig {
    #[serde(default)]
    pub emulator: EmulatorConfig,
    #[serde(default)]
    pub transport: TransportSection,
    #[serde(default)]
    pub display: DisplaySection,
}

/// General emulator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmulatorConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Path of the host application's `appinfo.json` manifest.
    #[serde(default = "default_app_info_path")]
    pub app_info_path: String,
}

/// Simulated channel timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportSection {
    /// Delay in milliseconds between a send and its ack/delivery.
    #[serde(default = "default_response_time_ms")]
    pub response_time_ms: u64,
}

/// Simulated screen geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySection {
    /// Screen width in pixels.
    #[serde(default = "default_screen_width")]
    pub width: u32,
    /// Screen height in pixels (also the menu viewport height).
    #[serde(default = "default_screen_height")]
    pub height: u32,
    /// Height of one rendered menu row in pixels.
    #[serde(default = "default_menu_item_height")]
    pub menu_item_height: u32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_app_info_path() -> String {
    "appinfo.json".to_string()
}
fn default_response_time_ms() -> u64 {
    50
}
fn default_screen_width() -> u32 {
    144
}
fn default_screen_height() -> u32 {
    168
}
fn default_menu_item_height() -> u32 {
    28
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            app_info_path: default_app_info_path(),
        }
    }
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            response_time_ms: default_response_time_ms(),
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            width: default_screen_width(),
            height: default_screen_height(),
            menu_item_height: default_menu_item_height(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `EmuConfig` from disk, returning `EmuConfig::default()` if the file
/// does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<EmuConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: EmuConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EmuConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Persists `config` to disk, creating the config directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &EmuConfig) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("WearEmu"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("wear-emu"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("WearEmu")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
