//! Configuration management
//!
//! Bootstrap configuration comes from a TOML file; every field has a
//! built-in default so a missing file or empty table still yields a working
//! service. Settings sources priority:
//!
//! 1. Command-line arguments (`--port`, `--media`)
//! 2. Environment variables (`REPRISE_PORT`, `REPRISE_MEDIA`, ...)
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)
//!
//! The CLI/env tiers are applied by the binary (clap); this module handles
//! the file and default tiers.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::playback::ControllerSettings;

/// Bundled demo track, relative to the working directory.
const DEFAULT_MEDIA_FILE: &str = "assets/jazz_in_paris.mp3";

/// Bootstrap configuration loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Media file served by default (bundled demo track when unset)
    #[serde(default)]
    pub media_file: Option<PathBuf>,

    /// Writable directory the demo media is staged into (platform data dir
    /// when unset)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Position update cadence while playing, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Replay from the start when a play-through completes
    #[serde(default)]
    pub looping: bool,

    /// Keep playing across a suspend lifecycle hook
    #[serde(default = "default_background_audio")]
    pub background_audio: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_port() -> u16 {
    5760
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_background_audio() -> bool {
    true
}

fn default_log_filter() -> String {
    "reprise=debug,tower_http=debug".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            media_file: None,
            data_dir: None,
            tick_interval_ms: default_tick_interval_ms(),
            looping: false,
            background_audio: default_background_audio(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Load from a file when one is given, built-in defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Media file with the bundled-demo default applied.
    pub fn media_file(&self) -> PathBuf {
        self.media_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_FILE))
    }

    /// Writable data directory with the platform default applied.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("reprise")
        })
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            tick_interval: self.tick_interval(),
            looping: self.looping,
            background_audio: self.background_audio,
        }
    }
}
