//! Shared HTTP client construction policy for metadata lookups.
//!
//! Centralizes timeout, user-agent, compression and proxy defaults so the
//! GitHub API and page scrapes behave the same way.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::{Client, Proxy};
use tracing::warn;

use crate::user_agent;

use super::MetadataError;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default whole-request timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Environment variables consulted, in order, when system proxy lookup is off.
const HTTPS_PROXY_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"];
const HTTP_PROXY_VARS: [&str; 4] = ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"];

/// Connect and read timeouts applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// TCP/TLS connect timeout in seconds.
    pub connect_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// How the client discovers proxies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxyLookup {
    /// reqwest's default, which may query OS proxy settings.
    System,
    /// Only `HTTP(S)_PROXY` / `ALL_PROXY` from the environment.
    EnvironmentOnly,
}

/// Builds the metadata HTTP client.
///
/// Querying OS proxy settings panics in some sandboxed environments; the
/// build is then retried with environment proxies only.
///
/// # Errors
///
/// Returns [`MetadataError::ClientBuild`] when client construction fails.
pub fn build_http_client(timeouts: HttpTimeouts) -> Result<Client, MetadataError> {
    let user_agent = user_agent::default_user_agent();

    for lookup in [ProxyLookup::System, ProxyLookup::EnvironmentOnly] {
        let attempt = catch_unwind(AssertUnwindSafe(|| {
            build_with(&user_agent, timeouts, lookup)
        }));
        match attempt {
            Ok(Ok(client)) => return Ok(client),
            Ok(Err(error)) => {
                return Err(MetadataError::ClientBuild {
                    reason: error.to_string(),
                });
            }
            Err(_) => warn!(?lookup, "HTTP client construction panicked"),
        }
    }

    Err(MetadataError::ClientBuild {
        reason: "construction panicked while initializing networking".to_string(),
    })
}

fn build_with(
    user_agent: &str,
    timeouts: HttpTimeouts,
    lookup: ProxyLookup,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .user_agent(user_agent)
        .gzip(true);

    if lookup == ProxyLookup::EnvironmentOnly {
        builder = builder.no_proxy();
        if let Some(proxy) = first_env_value(&HTTPS_PROXY_VARS).and_then(|p| Proxy::https(p).ok()) {
            builder = builder.proxy(proxy);
        }
        if let Some(proxy) = first_env_value(&HTTP_PROXY_VARS).and_then(|p| Proxy::http(p).ok()) {
            builder = builder.proxy(proxy);
        }
    }

    builder.build()
}

fn first_env_value(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
