// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for recap-agent integration tests
//!
//! This module provides utilities for:
//! - Temporary directory management
//! - Git repository scaffolding with pinned authors and timestamps

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use git2::{ConfigLevel, Repository, Signature, Time};

// ============================================================================
// Temporary Directory Management
// ============================================================================

/// Counter for generating unique test directory names
static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is automatically cleaned up when dropped
pub struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    /// Create a new uniquely named temporary test directory
    pub fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir_name = format!(
            "recap-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        );
        let path = std::env::temp_dir().join(dir_name);
        fs::create_dir_all(&path).expect("Failed to create temp test directory");
        Self { path }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a subdirectory within the temp directory
    pub fn create_subdir(&self, name: &str) -> PathBuf {
        let subdir = self.path.join(name);
        fs::create_dir_all(&subdir).expect("Failed to create subdirectory");
        subdir
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

// ============================================================================
// Git Repository Scaffolding
// ============================================================================

/// A real git repository created under a directory, committed to with `git2`
pub struct TestGitRepo {
    path: PathBuf,
    repo: Repository,
    file_counter: AtomicU32,
}

impl TestGitRepo {
    /// Initialize a repository at `parent/name`
    pub fn init_in(parent: &Path, name: &str) -> Self {
        let path = parent.join(name);
        fs::create_dir_all(&path).expect("Failed to create repository directory");
        let repo = Repository::init(&path).expect("Failed to init repository");
        Self {
            path,
            repo,
            file_counter: AtomicU32::new(0),
        }
    }

    /// Set the repository-level `user.email`
    pub fn set_local_email(&self, email: &str) -> &Self {
        let config = self.repo.config().expect("Failed to open config");
        let mut local = config
            .open_level(ConfigLevel::Local)
            .expect("Failed to open local config");
        local
            .set_str("user.email", email)
            .expect("Failed to set user.email");
        self
    }

    /// Get the path to the repository working directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commit a new file as `email` at `when`, returning the commit SHA
    pub fn commit_at(&self, email: &str, when: DateTime<Utc>, message: &str) -> String {
        let n = self.file_counter.fetch_add(1, Ordering::SeqCst);
        let relative = format!("file_{n}.txt");
        fs::write(self.path.join(&relative), message).expect("Failed to write file");

        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_path(Path::new(&relative))
            .expect("Failed to stage file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let signature = Signature::new("Test Author", email, &Time::new(when.timestamp(), 0))
            .expect("Failed to build signature");
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("Failed to commit")
            .to_string()
    }
}
