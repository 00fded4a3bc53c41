//! Error types for metadata lookups.
//!
//! Every lookup failure is recoverable from the ingestion routines' point of
//! view: they log it and continue with template defaults.

use thiserror::Error;

/// Errors that can occur while fetching remote metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, timeouts)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Response arrived but did not contain what the lookup needs.
    #[error("unexpected response from {url}: {reason}")]
    UnexpectedResponse {
        /// The URL whose response was unusable.
        url: String,
        /// What was missing or malformed.
        reason: String,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild {
        /// Why construction failed.
        reason: String,
    },
}

impl MetadataError {
    /// Creates a `Network` error.
    #[must_use]
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source,
        }
    }

    /// Creates an `HttpStatus` error.
    #[must_use]
    pub fn http_status(url: &str, status: u16) -> Self {
        Self::HttpStatus {
            url: url.to_string(),
            status,
        }
    }

    /// Creates an `UnexpectedResponse` error.
    #[must_use]
    pub fn unexpected(url: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status code, if this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
