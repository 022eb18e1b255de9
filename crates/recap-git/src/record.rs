//! Repository and commit records

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository selected for scanning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Absolute path to the repository working directory
    pub path: PathBuf,
    /// Display name, usually the directory name
    pub name: String,
}

impl RepositoryRef {
    /// Create a reference named after the final path component
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| path.display().to_string(), ToString::to_string)
}

/// Represents changes to one file in a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path to the file
    pub path: String,
    /// Change status: "added", "modified", "deleted", "renamed", "copied"
    pub status: String,
}

/// Summary of all changes in a commit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Number of files changed
    pub files_changed: usize,
    /// Total lines added
    pub insertions: usize,
    /// Total lines deleted
    pub deletions: usize,
    /// Per-file changes
    pub files: Vec<FileDiff>,
}

/// One commit found inside a scan window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Repository the commit belongs to
    pub repo: RepositoryRef,
    /// The commit SHA (40 hex characters)
    pub hash: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Full commit message: subject line plus optional body
    pub message: String,
    /// Diff summary (if requested)
    pub diff: Option<DiffSummary>,
}

impl CommitRecord {
    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..7.min(self.hash.len())]
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Get the message body after the subject, trimmed
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        let body = self
            .message
            .split_once('\n')
            .map(|(_, rest)| rest.trim())?;
        (!body.is_empty()).then_some(body)
    }
}

/// Which authors a repository scan included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "email", rename_all = "snake_case")]
pub enum AuthorScope {
    /// The caller supplied the author email
    Explicit(String),
    /// The email was read from the repository's git configuration
    Detected(String),
    /// No identity was available, so every author was included
    AllAuthors,
}

impl AuthorScope {
    /// The email used as a filter, if any
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Explicit(email) | Self::Detected(email) => Some(email),
            Self::AllAuthors => None,
        }
    }

    /// Whether an author filter was applied
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !matches!(self, Self::AllAuthors)
    }

    /// Whether `email` passes this scope's filter
    ///
    /// Comparison ignores case and surrounding whitespace.
    #[must_use]
    pub fn matches(&self, email: &str) -> bool {
        self.email()
            .is_none_or(|wanted| wanted.trim().to_lowercase() == email.trim().to_lowercase())
    }
}
