//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use addproject_core::JsonObject;
use addproject_core::config::CliSettings;
use addproject_core::record::parse_override;
use clap::Parser;
use serde_json::Value;

/// Usage line printed when the product or URL is missing.
pub const USAGE: &str = "Usage: addproject <product> <url> [id]";

/// Add a project (repository, Medium post or web page) to a product catalog.
///
/// The URL is classified, minimal metadata is fetched, and a JSON record is
/// written to `<config-dir>/<product>/repos/<id>.json` or
/// `<config-dir>/<product>/blogs/<id>.json`, merged into any existing file.
#[derive(Parser, Debug)]
#[command(name = "addproject")]
#[command(author, version, about)]
pub struct Args {
    /// Product the project belongs to
    pub product: Option<String>,

    /// Project URL (GitHub repository, Medium post, or any web page)
    pub url: Option<String>,

    /// Record identifier (defaults to one derived from the URL)
    pub id: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory holding templates, records and authors [default: ./config]
    #[arg(long, env = "ADDPROJECT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Set a record field after all computed values (KEY=VALUE, value parsed as JSON when valid)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, Value)>,

    /// GitHub REST API base URL
    #[arg(long)]
    pub github_api_url: Option<String>,

    /// Medium base URL used for profile pages
    #[arg(long)]
    pub medium_url: Option<String>,

    /// GitHub token for API requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

impl Args {
    /// Product and URL when both were given.
    #[must_use]
    pub fn target(&self) -> Option<(&str, &str)> {
        Some((self.product.as_deref()?, self.url.as_deref()?))
    }

    /// Overrides as one object; later `--set` flags win.
    #[must_use]
    pub fn override_object(&self) -> JsonObject {
        self.overrides.iter().cloned().collect()
    }

    /// Settings for config resolution.
    #[must_use]
    pub fn settings(&self) -> CliSettings {
        CliSettings {
            config_dir: self.config_dir.clone(),
            github_api_url: self.github_api_url.clone(),
            medium_url: self.medium_url.clone(),
            github_token: self.github_token.clone(),
        }
    }
}
