// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for recap-agent

use std::path::PathBuf;
use std::time::Duration;

use recap_git::LocateError;
use thiserror::Error;

/// Errors that abort a whole run before any scanning
#[derive(Debug, Error)]
pub enum RunError {
    /// No candidate repository path could be found
    #[error("Configuration error: {0}")]
    Configuration(#[from] LocateError),
}

/// Errors from the summarization collaborator
#[derive(Debug, Error)]
pub enum SummarizationError {
    /// No API key was configured
    #[error("Missing API key for the summarizer")]
    MissingApiKey,

    /// The HTTP request could not be completed
    #[error("Summarizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Summarizer API returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The response contained no text
    #[error("Summarizer returned an empty response")]
    EmptyResponse,

    /// The call exceeded its timeout
    #[error("Summarizer timed out after {0:?}")]
    Timeout(Duration),

    /// The summarizer task panicked or was cancelled
    #[error("Summarizer task failed: {0}")]
    Aborted(String),
}

/// Errors from a sink collaborator
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the filesystem failed
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The HTTP request could not be completed
    #[error("Sink request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with a non-success status
    #[error("Sink API returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Required credentials are not configured
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// The call exceeded its timeout
    #[error("Sink timed out after {0:?}")]
    Timeout(Duration),

    /// The sink task panicked or was cancelled
    #[error("Sink task failed: {0}")]
    Aborted(String),
}

/// Errors building the run pipeline from settings
#[derive(Debug, Error)]
pub enum SetupError {
    /// The summarizer could not be constructed
    #[error(transparent)]
    Summarizer(#[from] SummarizationError),

    /// A sink could not be constructed
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Cut an error body down to something loggable
pub(crate) fn truncate_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let mut out: String = body.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
