//! Configuration loading and resolution
//!
//! Each value resolves through a 4-tier priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default HTTP port for qbank-api
pub const DEFAULT_PORT: u16 = 5780;
/// Default cache validity window in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Remote CSV feed URL; empty means "no remote source configured"
    /// and the service runs entirely from base data
    pub feed_url: String,
    /// Local base dataset (JSON array of questions)
    pub base_data_path: PathBuf,
    /// Visit counter file
    pub visits_path: PathBuf,
    /// Cache validity window in seconds
    pub cache_ttl_secs: u64,
    /// Admin login username
    pub admin_username: String,
    /// Admin login password; empty disables admin login
    pub admin_password: String,
}

/// Values supplied on the command line, overriding all other tiers
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub feed_url: Option<String>,
    pub base_data_path: Option<PathBuf>,
    pub visits_path: Option<PathBuf>,
    pub cache_ttl_secs: Option<u64>,
    pub config_file: Option<PathBuf>,
}

/// Shape of the optional qbank.toml config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    port: Option<u16>,
    feed_url: Option<String>,
    base_data_path: Option<PathBuf>,
    visits_path: Option<PathBuf>,
    cache_ttl_secs: Option<u64>,
    admin_username: Option<String>,
    admin_password: Option<String>,
}

impl Config {
    /// Resolve the full configuration from overrides, environment,
    /// config file, and defaults.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let file = load_file_config(overrides.config_file.clone())?;
        let data_dir = default_data_dir();

        let port = overrides
            .port
            .or_else(|| env_parsed("QBANK_PORT"))
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);

        let feed_url = overrides
            .feed_url
            .or_else(|| std::env::var("QBANK_FEED_URL").ok())
            .or(file.feed_url)
            .unwrap_or_default();

        let base_data_path = overrides
            .base_data_path
            .or_else(|| std::env::var("QBANK_BASE_DATA").ok().map(PathBuf::from))
            .or(file.base_data_path)
            .unwrap_or_else(|| data_dir.join("questions.json"));

        let visits_path = overrides
            .visits_path
            .or_else(|| std::env::var("QBANK_VISITS").ok().map(PathBuf::from))
            .or(file.visits_path)
            .unwrap_or_else(|| data_dir.join("visits.json"));

        let cache_ttl_secs = overrides
            .cache_ttl_secs
            .or_else(|| env_parsed("QBANK_CACHE_TTL_SECS"))
            .or(file.cache_ttl_secs)
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let admin_username = std::env::var("QBANK_ADMIN_USERNAME")
            .ok()
            .or(file.admin_username)
            .unwrap_or_else(|| "admin".to_string());

        let admin_password = std::env::var("QBANK_ADMIN_PASSWORD")
            .ok()
            .or(file.admin_password)
            .unwrap_or_default();

        Ok(Config {
            port,
            feed_url,
            base_data_path,
            visits_path,
            cache_ttl_secs,
            admin_username,
            admin_password,
        })
    }
}

/// Parse an environment variable, ignoring unset or malformed values
fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Load the TOML config file if one exists.
///
/// An explicitly requested file that is missing or malformed is a
/// hard error; the default location is best-effort.
fn load_file_config(explicit: Option<PathBuf>) -> Result<FileConfig> {
    let (path, required) = match explicit {
        Some(path) => (Some(path), true),
        None => match std::env::var("QBANK_CONFIG").ok().map(PathBuf::from) {
            Some(path) => (Some(path), true),
            None => (default_config_path(), false),
        },
    };

    let Some(path) = path else {
        return Ok(FileConfig::default());
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Default config file location (~/.config/qbank/qbank.toml)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("qbank").join("qbank.toml"))
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("qbank"))
        .unwrap_or_else(|| PathBuf::from("./qbank_data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "QBANK_PORT",
            "QBANK_FEED_URL",
            "QBANK_BASE_DATA",
            "QBANK_VISITS",
            "QBANK_CACHE_TTL_SECS",
            "QBANK_ADMIN_USERNAME",
            "QBANK_ADMIN_PASSWORD",
            "QBANK_CONFIG",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_nothing_configured() {
        clear_env();
        let config = Config::load(Overrides::default()).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(config.feed_url, "");
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "");
    }

    #[test]
    #[serial]
    fn overrides_beat_environment() {
        clear_env();
        std::env::set_var("QBANK_PORT", "6000");
        let overrides = Overrides {
            port: Some(7000),
            ..Default::default()
        };
        let config = Config::load(overrides).unwrap();
        assert_eq!(config.port, 7000);
        clear_env();
    }

    #[test]
    #[serial]
    fn environment_beats_config_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("qbank.toml");
        std::fs::write(&file, "port = 6100\nfeed_url = \"http://file.example/feed\"\n")
            .unwrap();
        std::env::set_var("QBANK_CONFIG", &file);
        std::env::set_var("QBANK_PORT", "6200");

        let config = Config::load(Overrides::default()).unwrap();
        assert_eq!(config.port, 6200);
        // No env var for feed_url, so the file value applies
        assert_eq!(config.feed_url, "http://file.example/feed");
        clear_env();
    }

    #[test]
    #[serial]
    fn explicit_missing_config_file_is_an_error() {
        clear_env();
        let overrides = Overrides {
            config_file: Some(PathBuf::from("/nonexistent/qbank.toml")),
            ..Default::default()
        };
        assert!(Config::load(overrides).is_err());
    }

    #[test]
    #[serial]
    fn admin_credentials_from_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("qbank.toml");
        std::fs::write(
            &file,
            "admin_username = \"quizmaster\"\nadmin_password = \"s3cret\"\n",
        )
        .unwrap();
        std::env::set_var("QBANK_CONFIG", &file);

        let config = Config::load(Overrides::default()).unwrap();
        assert_eq!(config.admin_username, "quizmaster");
        assert_eq!(config.admin_password, "s3cret");
        clear_env();
    }
}
