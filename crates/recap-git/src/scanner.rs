// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit scanning
//!
//! This module walks the current branch of one repository with the `git2`
//! crate and returns the commits that fall inside a [`TimeWindow`],
//! optionally filtered to a single author.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use git2::{DiffOptions, ErrorCode, Repository, Sort};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GitError;
use crate::record::{AuthorScope, CommitRecord, DiffSummary, FileDiff, RepositoryRef};
use crate::window::TimeWindow;

/// Configuration for scanning one repository
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Author email to filter on; detected from git config when unset
    pub author_email: Option<String>,
    /// Include diff information for each commit
    pub include_diff: bool,
}

impl ScanOptions {
    /// Filter on an explicit author email
    #[must_use]
    pub fn author(mut self, email: impl Into<String>) -> Self {
        self.author_email = Some(email.into());
        self
    }

    /// Create options with diff extraction enabled
    #[must_use]
    pub fn with_diff(mut self) -> Self {
        self.include_diff = true;
        self
    }
}

/// A non-fatal problem scanning one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Display name of the repository
    pub repo: String,
    /// What went wrong
    pub message: String,
}

/// Everything learned from scanning one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoScan {
    /// The repository scanned
    pub repo: RepositoryRef,
    /// Matching commits, oldest first
    pub commits: Vec<CommitRecord>,
    /// Which authors were included
    pub author: AuthorScope,
    /// Current branch, when HEAD points at one
    pub branch: Option<String>,
    /// Set when the repository could not be queried
    pub warning: Option<ScanWarning>,
}

/// Scan one repository for commits inside `window`
///
/// Never fails: a repository that cannot be queried yields an empty commit
/// list and a [`ScanWarning`], so one broken repository cannot abort a
/// multi-repository scan.
#[must_use]
pub fn scan(repo: &RepositoryRef, window: &TimeWindow, options: &ScanOptions) -> RepoScan {
    let fallback_scope = options
        .author_email
        .clone()
        .map_or(AuthorScope::AllAuthors, AuthorScope::Explicit);

    let result = GitRepo::open(&repo.path).and_then(|git| {
        let author = resolve_author(options.author_email.as_deref(), git.configured_email());
        let commits = git.commits_in(repo, window, &author, options.include_diff)?;
        Ok((author, git.current_branch(), commits))
    });

    match result {
        Ok((author, branch, commits)) => {
            debug!(repo = %repo.name, commits = commits.len(), "Scanned repository");
            RepoScan {
                repo: repo.clone(),
                commits,
                author,
                branch,
                warning: None,
            }
        }
        Err(e) => {
            warn!(repo = %repo.name, error = %e, "Repository scan failed");
            RepoScan {
                repo: repo.clone(),
                commits: Vec::new(),
                author: fallback_scope,
                branch: None,
                warning: Some(ScanWarning {
                    repo: repo.name.clone(),
                    message: e.to_string(),
                }),
            }
        }
    }
}

/// Decide which authors to include for one repository
///
/// An explicit email wins; otherwise the repository's configured identity is
/// used; with neither, every author is included.
#[must_use]
pub fn resolve_author(explicit: Option<&str>, configured: Option<String>) -> AuthorScope {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    if let Some(email) = explicit.and_then(non_empty) {
        return AuthorScope::Explicit(email);
    }
    match configured.as_deref().and_then(non_empty) {
        Some(email) => AuthorScope::Detected(email),
        None => AuthorScope::AllAuthors,
    }
}

/// Order commits oldest first, breaking timestamp ties by hash
pub fn sort_chronologically(commits: &mut [CommitRecord]) {
    commits.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.hash.cmp(&b.hash))
    });
}

/// A git repository wrapper for reading commits
pub struct GitRepo {
    repo: Repository,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo").field("path", &self.path()).finish()
    }
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Get the repository metadata path
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// The `user.email` git would use for commits in this repository
    ///
    /// Repository-level configuration overrides global and system levels.
    #[must_use]
    pub fn configured_email(&self) -> Option<String> {
        let config = self.repo.config().ok()?.snapshot().ok()?;
        config
            .get_string("user.email")
            .ok()
            .filter(|email| !email.trim().is_empty())
    }

    /// Short name of the branch HEAD points at
    #[must_use]
    pub fn current_branch(&self) -> Option<String> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(ToString::to_string),
            Ok(_) => None,
            // An unborn branch still has a name in HEAD
            Err(_) => self
                .repo
                .find_reference("HEAD")
                .ok()
                .and_then(|r| r.symbolic_target().map(ToString::to_string))
                .map(|target| target.trim_start_matches("refs/heads/").to_string()),
        }
    }

    /// Commits on the current branch inside `window` whose author passes `author`
    ///
    /// Returned oldest first; ties broken by hash.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the history cannot be walked. A repository with
    /// no commits yet returns an empty list.
    pub fn commits_in(
        &self,
        repo: &RepositoryRef,
        window: &TimeWindow,
        author: &AuthorScope,
        include_diff: bool,
    ) -> Result<Vec<CommitRecord>, GitError> {
        if self.is_unborn()? {
            debug!(repo = %repo.name, "Repository has no commits yet");
            return Ok(Vec::new());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let git_commit = self.repo.find_commit(oid)?;

            let timestamp = commit_timestamp(&git_commit);
            if !window.contains(timestamp) {
                continue;
            }

            let signature = git_commit.author();
            let author_email = signature.email().unwrap_or("").to_string();
            if !author.matches(&author_email) {
                continue;
            }

            let diff = if include_diff {
                Some(self.extract_diff(&git_commit)?)
            } else {
                None
            };

            commits.push(CommitRecord {
                repo: repo.clone(),
                hash: git_commit.id().to_string(),
                author_name: signature.name().unwrap_or("Unknown").to_string(),
                author_email,
                timestamp,
                message: git_commit.message().unwrap_or("").to_string(),
                diff,
            });
        }

        sort_chronologically(&mut commits);
        Ok(commits)
    }

    /// Whether HEAD points at a branch that has no commits yet
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be read for any other reason.
    pub fn is_unborn(&self) -> Result<bool, GitError> {
        match self.repo.head() {
            Ok(_) => Ok(false),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(true),
            Err(e) => {
                if self.repo.is_empty()? {
                    Ok(true)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Extract diff summary for a commit
    fn extract_diff(&self, git_commit: &git2::Commit<'_>) -> Result<DiffSummary, GitError> {
        let tree = git_commit.tree()?;

        // Get parent tree (or empty for root commits)
        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.ignore_whitespace(false);

        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        let stats = diff.stats()?;
        let files = diff
            .deltas()
            .map(|delta| {
                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());

                let status = match delta.status() {
                    git2::Delta::Added => "added",
                    git2::Delta::Deleted => "deleted",
                    git2::Delta::Modified => "modified",
                    git2::Delta::Renamed => "renamed",
                    git2::Delta::Copied => "copied",
                    _ => "unknown",
                }
                .to_string();

                FileDiff { path, status }
            })
            .collect();

        Ok(DiffSummary {
            files_changed: stats.files_changed(),
            insertions: stats.insertions(),
            deletions: stats.deletions(),
            files,
        })
    }
}

/// Committer time of a commit, which is what `git log --since/--until` filters on
fn commit_timestamp(git_commit: &git2::Commit<'_>) -> DateTime<Utc> {
    let time = git_commit.time();
    Utc.timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
