//! File configuration for the cookbook page and server.
//!
//! Values are layered CLI > environment > config file > defaults; this
//! module owns the file layer and the defaults.

use std::env;
use std::ffi::OsString;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::normalize::FieldAliases;
use crate::source::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts};
use crate::web::DEFAULT_MAX_SESSIONS;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8501;

/// Default bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default seconds a loaded cookbook is reused before re-fetching.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Default seconds an idle session is kept.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

/// Errors loading or validating the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is outside its accepted range.
    #[error("invalid config value for `{key}`: {value}. Expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl ToString, expected: &'static str) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            expected,
        }
    }
}

/// Where the recipe table comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSection {
    /// Google Sheets link or any URL serving CSV.
    pub sheet_url: Option<String>,
    /// Local CSV export.
    pub csv_path: Option<PathBuf>,
    /// Worksheet (tab) name inside the spreadsheet.
    pub worksheet: Option<String>,
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: String,
    pub port: u16,
    /// Seconds a fetched cookbook is reused; 0 re-fetches for every new session.
    pub cache_ttl_secs: u64,
    /// Seconds of inactivity before a session's shuffle and suggestion are dropped.
    pub session_idle_secs: u64,
    /// Live sessions kept at once; the least recently seen is evicted beyond this.
    pub max_sessions: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ServerSection {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    #[must_use]
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

/// Sheet fetch timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSection {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

impl HttpSection {
    #[must_use]
    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect_secs: self.connect_timeout_secs,
            read_secs: self.read_timeout_secs,
        }
    }
}

/// Look and wording of the gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Browser tab title.
    pub title: String,
    /// Heading shown above the page.
    pub heading: String,
    /// Emoji or short text used as the page icon.
    pub icon: String,
    /// CSS background color.
    pub background: String,
    /// Gallery columns.
    pub columns: u8,
    /// Placeholder text of the search box.
    pub search_placeholder: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Cookbook".to_string(),
            heading: "📖 Cookbook".to_string(),
            icon: "🍳".to_string(),
            background: "#fdfaf0".to_string(),
            columns: 3,
            search_placeholder: "e.g. Pasta".to_string(),
        }
    }
}

/// The whole config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source: SourceSection,
    pub server: ServerSection,
    pub http: HttpSection,
    pub page: PageConfig,
    pub fields: FieldAliases,
}

impl FileConfig {
    /// Parses TOML text and validates it.
    ///
    /// `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates config values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<IpAddr>().is_err() {
            return Err(ConfigError::invalid(
                "server.bind",
                &self.server.bind,
                "an IP address such as 0.0.0.0 or 127.0.0.1",
            ));
        }
        if self.server.cache_ttl_secs > 86_400 {
            return Err(ConfigError::invalid(
                "server.cache_ttl_secs",
                self.server.cache_ttl_secs,
                "range 0..=86400",
            ));
        }
        if !(60..=604_800).contains(&self.server.session_idle_secs) {
            return Err(ConfigError::invalid(
                "server.session_idle_secs",
                self.server.session_idle_secs,
                "range 60..=604800",
            ));
        }
        if !(1..=1_000_000).contains(&self.server.max_sessions) {
            return Err(ConfigError::invalid(
                "server.max_sessions",
                self.server.max_sessions,
                "range 1..=1000000",
            ));
        }
        validate_timeout_secs("http.connect_timeout_secs", self.http.connect_timeout_secs)?;
        validate_timeout_secs("http.read_timeout_secs", self.http.read_timeout_secs)?;
        if !(1..=6).contains(&self.page.columns) {
            return Err(ConfigError::invalid(
                "page.columns",
                self.page.columns,
                "range 1..=6",
            ));
        }
        Ok(())
    }
}

fn validate_timeout_secs(key: &'static str, value: u64) -> Result<(), ConfigError> {
    if (1..=3600).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "range 1..=3600"))
    }
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/cookbook/config.toml`
/// 2. `$HOME/.config/cookbook/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("cookbook")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("cookbook")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read, parsed or validated.
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    FileConfig::from_toml_str(&raw, path)
}

/// Loads an explicit config path, or the default path when it exists.
///
/// A missing default file yields the built-in defaults; a missing explicit
/// file is an error.
///
/// # Errors
///
/// Returns [`ConfigError`] when a config file cannot be read, parsed or validated.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_file_config(path);
    }

    match resolve_default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Loading config file");
            load_file_config(&path)
        }
        _ => Ok(FileConfig::default()),
    }
}
