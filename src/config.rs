//! Runtime configuration: flags, environment, config file, defaults.
//!
//! Each setting is taken from the first source that provides it:
//! command-line flag or its environment variable, then
//! `$XDG_CONFIG_HOME/addproject/config.toml`
//! (or `~/.config/addproject/config.toml`), then the built-in default.
//!
//! ```toml
//! config_dir = "/srv/catalog"
//! github_api_url = "https://api.github.com"
//! medium_url = "https://medium.com"
//! connect_timeout_secs = 10
//! read_timeout_secs = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use url::Url;

use crate::metadata::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_GITHUB_API_URL, DEFAULT_MEDIUM_URL,
    DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts, MetadataEndpoints,
};

/// Configuration directory used when nothing else names one.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Settings read from the config file. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Root of the templates and records.
    pub config_dir: Option<PathBuf>,
    /// GitHub REST API base URL.
    pub github_api_url: Option<String>,
    /// Medium site base URL.
    pub medium_url: Option<String>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parses and validates config file contents.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML, unknown keys, wrongly typed values, or values
    /// rejected by [`FileConfig::validate`].
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates values the TOML types cannot express.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range timeouts or base URLs that are not http(s).
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("read_timeout_secs", self.read_timeout_secs),
        ] {
            if let Some(secs) = value
                && !(1..=3600).contains(&secs)
            {
                bail!("Invalid config value for `{field}`: {secs}. Expected range: 1..=3600");
            }
        }
        for (field, value) in [
            ("github_api_url", self.github_api_url.as_deref()),
            ("medium_url", self.medium_url.as_deref()),
        ] {
            if let Some(raw) = value {
                let parsed = Url::parse(raw)
                    .with_context(|| format!("Invalid config value for `{field}`: '{raw}'"))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    bail!("Invalid config value for `{field}`: '{raw}'. Expected an http or https URL");
                }
            }
        }
        Ok(())
    }
}

/// Config file lookup result.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Where the config file is expected, if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when the file exists.
    pub config: Option<FileConfig>,
}

/// Location of the config file: `$XDG_CONFIG_HOME` when set and non-empty,
/// otherwise `~/.config`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
    Some(base.join("addproject").join("config.toml"))
}

/// Loads the config file from [`default_config_path`] if it exists.
///
/// # Errors
///
/// Fails when the file exists but cannot be read, parsed, or validated.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = default_config_path();
    let config = match path.as_deref() {
        Some(found) if found.exists() => Some(load_file_config(found)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

/// Loads and validates a config file.
///
/// # Errors
///
/// Fails when the file cannot be read or [`FileConfig::from_toml`] rejects it.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    FileConfig::from_toml(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// Values supplied on the command line or through their environment
/// variables.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    /// `--config-dir` / `ADDPROJECT_CONFIG_DIR`
    pub config_dir: Option<PathBuf>,
    /// `--github-api-url`
    pub github_api_url: Option<String>,
    /// `--medium-url`
    pub medium_url: Option<String>,
    /// `--github-token` / `GITHUB_TOKEN`
    pub github_token: Option<String>,
}

/// Fully resolved settings for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Root of the templates and records.
    pub config_dir: PathBuf,
    /// Remote endpoints, credential and timeouts.
    pub endpoints: MetadataEndpoints,
}

impl IngestConfig {
    /// Layers command-line settings over the file config over defaults.
    #[must_use]
    pub fn resolve(cli: CliSettings, file: Option<&FileConfig>) -> Self {
        let file = file.cloned().unwrap_or_default();
        let config_dir = cli
            .config_dir
            .or(file.config_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));
        let github_token = cli.github_token.filter(|token| !token.trim().is_empty());

        Self {
            config_dir,
            endpoints: MetadataEndpoints {
                github_api_url: cli
                    .github_api_url
                    .or(file.github_api_url)
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
                github_token,
                medium_url: cli
                    .medium_url
                    .or(file.medium_url)
                    .unwrap_or_else(|| DEFAULT_MEDIUM_URL.to_string()),
                timeouts: HttpTimeouts {
                    connect_secs: file
                        .connect_timeout_secs
                        .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                    read_secs: file.read_timeout_secs.unwrap_or(DEFAULT_READ_TIMEOUT_SECS),
                },
            },
        }
    }
}
