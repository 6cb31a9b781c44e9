//! Configuration system: TOML file + env var overrides + defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, RpError};

/// Full reporter configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub coverage: CoverageConfig,
    pub log: LogConfig,
    pub paths: PathsConfig,
}

/// Console output knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit ANSI styling. `--no-color` wins over this.
    pub color: bool,
    /// Separate a non-clean footer from the header with a blank line.
    pub verbose: bool,
    /// Glyph written for each test that finished without a fault glyph.
    pub progress_glyph: String,
}

/// Coverage block settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoverageConfig {
    /// Render the coverage block when the run carries a coverage report.
    pub enabled: bool,
}

/// JSONL activity log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: bool,
    pub jsonl_path: PathBuf,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

/// Filesystem paths used by rprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            verbose: false,
            progress_glyph: ".".to_string(),
        }
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            jsonl_path: home_dir()
                .join(".local")
                .join("share")
                .join("rprint")
                .join("activity.jsonl"),
            max_size_bytes: 10 * 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_file: home_dir().join(".config").join("rprint").join("config.toml"),
        }
    }
}

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[RP-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| RpError::io(&path_buf, source))?;
            toml::from_str::<Self>(&raw)?
        } else if path.is_some() {
            return Err(RpError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides_from(env_var)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic hash of the effective config (FNV-1a over canonical JSON).
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    /// The configured progress glyph as a single char.
    #[must_use]
    pub fn progress_glyph(&self) -> char {
        self.output.progress_glyph.chars().next().unwrap_or('.')
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("RPRINT_OUTPUT_COLOR") {
            self.output.color = parse_env("RPRINT_OUTPUT_COLOR", &raw)?;
        }
        if let Some(raw) = lookup("RPRINT_OUTPUT_VERBOSE") {
            self.output.verbose = parse_env("RPRINT_OUTPUT_VERBOSE", &raw)?;
        }
        if let Some(raw) = lookup("RPRINT_OUTPUT_PROGRESS_GLYPH") {
            self.output.progress_glyph = raw;
        }
        if let Some(raw) = lookup("RPRINT_COVERAGE_ENABLED") {
            self.coverage.enabled = parse_env("RPRINT_COVERAGE_ENABLED", &raw)?;
        }
        if let Some(raw) = lookup("RPRINT_LOG_ENABLED") {
            self.log.enabled = parse_env("RPRINT_LOG_ENABLED", &raw)?;
        }
        if let Some(raw) = lookup("RPRINT_LOG_JSONL_PATH") {
            self.log.jsonl_path = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("RPRINT_LOG_MAX_SIZE_BYTES") {
            self.log.max_size_bytes = parse_env("RPRINT_LOG_MAX_SIZE_BYTES", &raw)?;
        }
        if let Some(raw) = lookup("RPRINT_LOG_MAX_ROTATED_FILES") {
            self.log.max_rotated_files = parse_env("RPRINT_LOG_MAX_ROTATED_FILES", &raw)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let mut glyph = self.output.progress_glyph.chars();
        match (glyph.next(), glyph.next()) {
            (Some(c), None) if !c.is_whitespace() => {}
            _ => {
                return Err(RpError::InvalidConfig {
                    details: format!(
                        "output.progress_glyph must be a single visible character, got {:?}",
                        self.output.progress_glyph
                    ),
                });
            }
        }

        if self.log.enabled && self.log.max_size_bytes == 0 {
            return Err(RpError::InvalidConfig {
                details: "log.max_size_bytes must be > 0 when logging is enabled".to_string(),
            });
        }

        if self.log.max_rotated_files == 0 {
            return Err(RpError::InvalidConfig {
                details: "log.max_rotated_files must be >= 1".to_string(),
            });
        }

        if self.log.enabled && self.log.jsonl_path.as_os_str().is_empty() {
            return Err(RpError::InvalidConfig {
                details: "log.jsonl_path must be set when logging is enabled".to_string(),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|error| RpError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}
