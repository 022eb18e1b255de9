// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for recap-git

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during git operations on a single repository
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },
}

/// Errors that prevent repository discovery from producing anything to scan
///
/// These are fatal for a run: nothing can be gathered when there is no
/// candidate path at all. Invalid candidates are not errors, they are
/// reported as drops.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Neither an explicit list nor a parent directory yielded a candidate
    #[error("No candidate repository paths: {reason}")]
    NoCandidates {
        /// Why no candidate could be produced
        reason: String,
    },

    /// The parent directory could not be listed
    #[error("Cannot read repository parent directory {path}: {source}")]
    ParentUnreadable {
        /// The parent directory
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },
}

/// Errors constructing a time window
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// The window start is not strictly before its end
    #[error("Window start {start} is not before end {end}")]
    Empty {
        /// Window start (RFC 3339)
        start: String,
        /// Window end (RFC 3339)
        end: String,
    },
}
