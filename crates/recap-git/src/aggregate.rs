// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Activity aggregation
//!
//! Merges per-repository scans into one immutable [`ActivityRecord`].

use serde::Serialize;

use crate::record::{AuthorScope, CommitRecord, RepositoryRef};
use crate::scanner::{RepoScan, ScanWarning, sort_chronologically};
use crate::window::TimeWindow;

/// Commits from one repository that had activity in the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoActivity {
    /// The repository
    pub repo: RepositoryRef,
    /// Current branch at scan time
    pub branch: Option<String>,
    /// Which authors were included
    pub author: AuthorScope,
    /// Commits, oldest first
    pub commits: Vec<CommitRecord>,
}

impl RepoActivity {
    /// Distinct file paths touched by the group's commits, sorted
    #[must_use]
    pub fn files_changed(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .commits
            .iter()
            .filter_map(|c| c.diff.as_ref())
            .flat_map(|d| d.files.iter().map(|f| f.path.as_str()))
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }

    /// Total (insertions, deletions) across the group's commits
    #[must_use]
    pub fn line_stats(&self) -> (usize, usize) {
        self.commits
            .iter()
            .filter_map(|c| c.diff.as_ref())
            .fold((0, 0), |(ins, del), d| (ins + d.insertions, del + d.deletions))
    }
}

/// Normalized activity for one window across all scanned repositories
///
/// Built once per run by [`aggregate`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    window: TimeWindow,
    groups: Vec<RepoActivity>,
    total_commit_count: usize,
    repos_scanned: usize,
    warnings: Vec<ScanWarning>,
}

impl ActivityRecord {
    /// The window the activity covers
    #[must_use]
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Repositories with at least one commit, in scan order
    #[must_use]
    pub fn groups(&self) -> &[RepoActivity] {
        &self.groups
    }

    /// Look up a group by repository display name
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&RepoActivity> {
        self.groups.iter().find(|g| g.repo.name == name)
    }

    /// Sum of commits across all groups
    #[must_use]
    pub fn total_commit_count(&self) -> usize {
        self.total_commit_count
    }

    /// Number of repositories that were scanned, with or without activity
    #[must_use]
    pub fn repos_scanned(&self) -> usize {
        self.repos_scanned
    }

    /// Non-fatal scan problems
    #[must_use]
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Whether no commit was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_commit_count == 0
    }

    /// Names of groups gathered without an author filter
    #[must_use]
    pub fn all_author_repos(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| !g.author.is_filtered())
            .map(|g| g.repo.name.as_str())
            .collect()
    }
}

/// Merge per-repository scans into a single activity record
///
/// Repositories without commits are left out of the groups. Group order is
/// the order of `scans`; presentation code that wants another order sorts
/// on its own.
#[must_use]
pub fn aggregate(window: TimeWindow, scans: Vec<RepoScan>) -> ActivityRecord {
    let repos_scanned = scans.len();
    let mut groups: Vec<RepoActivity> = Vec::new();
    let mut warnings = Vec::new();

    for scan in scans {
        if let Some(warning) = scan.warning {
            warnings.push(warning);
        }

        let mut commits: Vec<CommitRecord> = scan
            .commits
            .into_iter()
            .filter(|c| window.contains(c.timestamp))
            .collect();
        if commits.is_empty() {
            continue;
        }

        if let Some(existing) = groups.iter_mut().find(|g| g.repo.name == scan.repo.name) {
            existing.commits.append(&mut commits);
            sort_chronologically(&mut existing.commits);
            continue;
        }

        sort_chronologically(&mut commits);
        groups.push(RepoActivity {
            repo: scan.repo,
            branch: scan.branch,
            author: scan.author,
            commits,
        });
    }

    let total_commit_count = groups.iter().map(|g| g.commits.len()).sum();

    ActivityRecord {
        window,
        groups,
        total_commit_count,
        repos_scanned,
        warnings,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    proptest! {
        /// Property: no aggregated commit lies outside the window and the total matches the groups
        #[test]
        fn prop_aggregate_respects_window(
            offsets in proptest::collection::vec(
                proptest::collection::vec(-100_000i64..200_000i64, 0..10),
                0..6,
            )
        ) {
            let start = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
            let window = TimeWindow::new(start, start + Duration::hours(24)).unwrap();
            let scans: Vec<RepoScan> = offsets
                .iter()
                .enumerate()
                .map(|(i, repo_offsets)| {
                    let repo = RepositoryRef::from_path(format!("/repos/r{i}"));
                    let commits = repo_offsets
                        .iter()
                        .enumerate()
                        .map(|(j, secs)| CommitRecord {
                            repo: repo.clone(),
                            hash: format!("{i:04}{j:036}"),
                            author_name: "Dev".into(),
                            author_email: "dev@example.com".into(),
                            timestamp: start + Duration::seconds(*secs),
                            message: String::new(),
                            diff: None,
                        })
                        .collect();
                    RepoScan {
                        repo,
                        commits,
                        author: AuthorScope::AllAuthors,
                        branch: None,
                        warning: None,
                    }
                })
                .collect();

            let record = aggregate(window, scans);
            let mut total = 0;
            for group in record.groups() {
                prop_assert!(!group.commits.is_empty());
                for c in &group.commits {
                    prop_assert!(window.contains(c.timestamp));
                }
                for pair in group.commits.windows(2) {
                    prop_assert!(pair[0].timestamp <= pair[1].timestamp);
                }
                total += group.commits.len();
            }
            prop_assert_eq!(total, record.total_commit_count());
            prop_assert_eq!(record.repos_scanned(), offsets.len());
        }
    }
}
