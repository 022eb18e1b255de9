// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository discovery
//!
//! Turns either an explicit list of paths or a parent directory into the
//! ordered set of repositories to scan. Invalid candidates are dropped and
//! reported; only the absence of any candidate at all is an error.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::LocateError;
use crate::record::{RepositoryRef, display_name};

/// A candidate path that was not accepted as a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedPath {
    /// The path as it was supplied
    pub path: PathBuf,
    /// Why it was dropped
    pub reason: String,
}

/// Result of repository discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocatedRepos {
    /// Valid repositories, in discovery order, without duplicates
    pub repos: Vec<RepositoryRef>,
    /// Explicitly listed paths that were rejected
    pub dropped: Vec<DroppedPath>,
}

impl LocatedRepos {
    /// Whether no valid repository was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

/// Locate repositories to scan
///
/// A non-empty `explicit_repos` takes precedence and is used exactly, each
/// entry still validated. Otherwise `parent_dir` itself (when it is a
/// repository) and its immediate subdirectories are considered, in name
/// order, silently skipping directories without git metadata.
///
/// # Errors
///
/// Returns `LocateError` when there is no candidate path to check at all.
pub fn locate(
    parent_dir: Option<&Path>,
    explicit_repos: &[PathBuf],
) -> Result<LocatedRepos, LocateError> {
    let mut located = LocatedRepos::default();
    let mut seen = HashSet::new();

    if !explicit_repos.is_empty() {
        for raw in explicit_repos {
            match validate(&expand_home(raw)) {
                Ok(path) => push_unique(&mut located, &mut seen, path),
                Err(reason) => {
                    warn!(path = %raw.display(), reason = %reason, "Dropping repository path");
                    located.dropped.push(DroppedPath {
                        path: raw.clone(),
                        reason,
                    });
                }
            }
        }
        return Ok(located);
    }

    let Some(parent) = parent_dir else {
        return Err(LocateError::NoCandidates {
            reason: "neither a repository list nor a parent directory was configured".into(),
        });
    };
    let parent = expand_home(parent);

    let entries = std::fs::read_dir(&parent).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LocateError::NoCandidates {
                reason: format!("parent directory {} does not exist", parent.display()),
            }
        } else {
            LocateError::ParentUnreadable {
                path: parent.clone(),
                source,
            }
        }
    })?;

    let mut candidates = Vec::new();
    if has_git_metadata(&parent) {
        candidates.push(parent.clone());
    }
    let mut children: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    children.sort();
    candidates.extend(children);

    if candidates.is_empty() {
        return Err(LocateError::NoCandidates {
            reason: format!("parent directory {} has no subdirectories", parent.display()),
        });
    }

    for candidate in candidates {
        match validate(&candidate) {
            Ok(path) => push_unique(&mut located, &mut seen, path),
            Err(reason) => debug!(path = %candidate.display(), reason = %reason, "Skipping directory"),
        }
    }

    Ok(located)
}

/// Expand a leading `~` to the user's home directory
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Whether `path` carries git metadata (a `.git` directory, or a `.git` file for worktrees)
#[must_use]
pub fn has_git_metadata(path: &Path) -> bool {
    path.join(".git").exists()
}

fn validate(path: &Path) -> Result<PathBuf, String> {
    if !path.exists() {
        return Err("path does not exist".into());
    }
    if !path.is_dir() {
        return Err("path is not a directory".into());
    }
    if !has_git_metadata(path) {
        return Err("no .git metadata".into());
    }
    path.canonicalize()
        .map_err(|e| format!("cannot resolve path: {e}"))
}

fn push_unique(located: &mut LocatedRepos, seen: &mut HashSet<PathBuf>, path: PathBuf) {
    if !seen.insert(path.clone()) {
        debug!(path = %path.display(), "Ignoring duplicate repository path");
        return;
    }

    let mut repo = RepositoryRef::from_path(path);
    if located.repos.iter().any(|r| r.name == repo.name) {
        let qualified = repo
            .path
            .parent()
            .map(|p| format!("{}/{}", display_name(p), repo.name));
        repo.name = match qualified {
            Some(name) if !located.repos.iter().any(|r| r.name == name) => name,
            _ => repo.path.display().to_string(),
        };
    }
    located.repos.push(repo);
}
