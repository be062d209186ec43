//! Error types for the translation loader.
//!
//! Per-module failures ([`HttpError`], [`FetchError`]) are contained inside the
//! loader and reported through the `translate_error` hook. Only
//! [`LoaderError`] ever reaches a caller of `get_translation`.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by an [`HttpClient`](crate::http::HttpClient) while fetching a resource.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The status code returned by the server.
        status: StatusCode,
    },

    /// The resource path could not be turned into a request URL.
    #[error("invalid resource path \"{path}\": {reason}")]
    InvalidPath {
        /// The rejected path.
        path: String,
        /// Description of the failure.
        reason: String,
    },

    /// The underlying HTTP client could not be configured.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl HttpError {
    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport { source, .. } => source.status(),
            HttpError::InvalidPath { .. } | HttpError::ClientBuild(_) => None,
        }
    }
}

/// Failure of a single module's fetch-and-parse step.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The resource could not be retrieved.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The body was retrieved but the file parser rejected it.
    #[error("failed to parse translation file: {0:#}")]
    Parse(anyhow::Error),
}

/// Errors surfaced to the caller of the loader.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The configuration was rejected when the loader was built.
    #[error("invalid loader configuration: {0}")]
    InvalidConfig(String),

    /// The caller-supplied merge function failed.
    #[error("translation merger failed: {0:#}")]
    Merge(anyhow::Error),
}
