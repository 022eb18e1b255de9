// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! recap-git: git activity collection for recap
//!
//! This library crate finds repositories, scans each one for the commits in
//! a time window, and merges the results into a single activity record that
//! the recap agent summarizes.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use recap_git::{ScanOptions, TimeWindow, aggregate, locate, scan};
//!
//! let located = locate(Some("/home/dev/projects".as_ref()), &[]).expect("locate");
//! let window = TimeWindow::day_of(Utc::now(), chrono_tz::Asia::Shanghai);
//! let scans = located
//!     .repos
//!     .iter()
//!     .map(|repo| scan(repo, &window, &ScanOptions::default()))
//!     .collect();
//! let activity = aggregate(window, scans);
//! println!("{} commits today", activity.total_commit_count());
//! ```

pub mod aggregate;
pub mod error;
pub mod locator;
pub mod record;
pub mod scanner;
pub mod window;

pub use aggregate::{ActivityRecord, RepoActivity, aggregate};
pub use error::{GitError, LocateError, WindowError};
pub use locator::{DroppedPath, LocatedRepos, expand_home, locate};
pub use record::{AuthorScope, CommitRecord, DiffSummary, FileDiff, RepositoryRef};
pub use scanner::{GitRepo, RepoScan, ScanOptions, ScanWarning, scan};
pub use window::TimeWindow;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::{ActivityRecord, aggregate};
    pub use crate::error::{GitError, LocateError};
    pub use crate::locator::locate;
    pub use crate::record::{AuthorScope, CommitRecord, RepositoryRef};
    pub use crate::scanner::{ScanOptions, scan};
    pub use crate::window::TimeWindow;
}
