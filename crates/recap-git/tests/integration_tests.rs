// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for recap-git
//!
//! These tests build real repositories with pinned commit times and scan them.


use chrono::{DateTime, Duration, TimeZone, Utc};
use recap_git::{AuthorScope, ScanOptions, TimeWindow, aggregate, locate, scan};
use similar_asserts::assert_eq;
use test_utils::{TempTestDir, TestGitRepo};

const ME: &str = "me@example.com";
const OTHER: &str = "other@example.com";

fn day() -> TimeWindow {
    TimeWindow::new(
        Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn at(hour: i64) -> DateTime<Utc> {
    day().start() + Duration::hours(hour)
}

#[test]
fn test_scan_filters_by_window_and_author() {
    let dir = TempTestDir::new("scan-filter");
    let repo = TestGitRepo::init_in(dir.path(), "app");
    repo.commit_at(ME, at(-2), "yesterday");
    let first = repo.commit_at(ME, at(9), "morning work");
    repo.commit_at(OTHER, at(10), "teammate work");
    let second = repo.commit_at(ME, at(15), "afternoon work");
    repo.commit_at(ME, at(25), "tomorrow");

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default().author(ME));

    let hashes: Vec<&str> = result.commits.iter().map(|c| c.hash.as_str()).collect();
    assert_eq!(hashes, vec![first.as_str(), second.as_str()]);
    assert_eq!(result.author, AuthorScope::Explicit(ME.into()));
    assert!(result.warning.is_none());
    assert_eq!(result.commits[0].subject(), "morning work");
}

#[test]
fn test_scan_author_filter_is_case_insensitive() {
    let dir = TempTestDir::new("scan-case");
    let repo = TestGitRepo::init_in(dir.path(), "app");
    repo.commit_at("Me@Example.COM", at(9), "shouty email");

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default().author(ME));
    assert_eq!(result.commits.len(), 1);
}

#[test]
fn test_scan_window_boundaries() {
    let dir = TempTestDir::new("scan-bounds");
    let repo = TestGitRepo::init_in(dir.path(), "app");
    let at_start = repo.commit_at(ME, day().start(), "at start");
    repo.commit_at(ME, day().end(), "at end");

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default().author(ME));
    assert_eq!(result.commits.len(), 1);
    assert_eq!(result.commits[0].hash, at_start);
}

#[test]
fn test_scan_detects_local_identity() {
    let dir = TempTestDir::new("scan-detect");
    let repo = TestGitRepo::init_in(dir.path(), "app");
    repo.set_local_email(ME);
    repo.commit_at(ME, at(9), "mine");
    repo.commit_at(OTHER, at(10), "theirs");

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default());
    assert_eq!(result.author, AuthorScope::Detected(ME.into()));
    assert_eq!(result.commits.len(), 1);
    assert_eq!(result.commits[0].author_email, ME);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = TempTestDir::new("scan-idempotent");
    let repo = TestGitRepo::init_in(dir.path(), "app");
    for hour in [9, 9, 11, 13] {
        repo.commit_at(ME, at(hour), &format!("work at {hour}"));
    }

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let options = ScanOptions::default().author(ME).with_diff();
    let first = scan(&located.repos[0], &day(), &options);
    let second = scan(&located.repos[0], &day(), &options);
    assert_eq!(first, second);
    assert_eq!(first.commits.len(), 4);
    // Same-second commits are ordered by hash
    assert!(first.commits[0].hash < first.commits[1].hash);
}

#[test]
fn test_scan_with_diff_records_files() {
    let dir = TempTestDir::new("scan-diff");
    let repo = TestGitRepo::init_in(dir.path(), "app");
    repo.commit_at(ME, at(9), "add file");

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default().author(ME).with_diff());
    let diff = result.commits[0].diff.as_ref().expect("diff requested");
    assert_eq!(diff.files_changed, 1);
    assert_eq!(diff.files[0].path, "file_0.txt");
    assert_eq!(diff.files[0].status, "added");
    assert_eq!(diff.insertions, 1);
}

#[test]
fn test_scan_reports_branch() {
    let dir = TempTestDir::new("scan-branch");
    let repo = TestGitRepo::init_in(dir.path(), "app");
    repo.commit_at(ME, at(9), "first");

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default().author(ME));
    let branch = result.branch.expect("branch");
    assert!(!branch.is_empty());
}

#[test]
fn test_scan_of_empty_repository_is_not_a_warning() {
    let dir = TempTestDir::new("scan-unborn");
    let repo = TestGitRepo::init_in(dir.path(), "fresh");

    let located = locate(None, &[repo.path().to_path_buf()]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default().author(ME));
    assert!(result.commits.is_empty());
    assert!(result.warning.is_none());
    assert_eq!(result.branch.as_deref().map(str::is_empty), Some(false));
}

#[test]
fn test_unborn_branch_with_custom_name_is_not_a_warning() {
    let dir = TempTestDir::new("scan-unborn-trunk");
    let path = dir.path().join("trunk");
    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head("trunk");
    git2::Repository::init_opts(&path, &opts).expect("init");

    let git = recap_git::GitRepo::open(&path).expect("open");
    assert!(git.is_unborn().expect("head readable"));

    let located = locate(None, &[path]).expect("locate");
    let result = scan(&located.repos[0], &day(), &ScanOptions::default());
    assert!(result.commits.is_empty());
    assert!(result.warning.is_none());
    assert_eq!(result.branch.as_deref(), Some("trunk"));
}

#[test]
fn test_corrupt_repository_warns_without_aborting_others() {
    let dir = TempTestDir::new("scan-corrupt");
    let good = TestGitRepo::init_in(dir.path(), "good");
    good.commit_at(ME, at(9), "fine");
    // A `.git` directory with nothing in it is not a usable repository
    std::fs::create_dir_all(dir.path().join("broken").join(".git")).unwrap();

    let located = locate(Some(dir.path()), &[]).expect("locate");
    assert_eq!(located.repos.len(), 2);

    let options = ScanOptions::default().author(ME);
    let scans = located
        .repos
        .iter()
        .map(|repo| scan(repo, &day(), &options))
        .collect();
    let activity = aggregate(day(), scans);

    assert_eq!(activity.total_commit_count(), 1);
    assert_eq!(activity.warnings().len(), 1);
    assert_eq!(activity.warnings()[0].repo, "broken");
    assert!(activity.group("good").is_some());
}

#[test]
fn test_two_repositories_end_to_end() {
    let dir = TempTestDir::new("e2e");
    let a = TestGitRepo::init_in(dir.path(), "A");
    let b = TestGitRepo::init_in(dir.path(), "B");
    a.commit_at(ME, at(11), "third");
    a.commit_at(ME, at(9), "first");
    a.commit_at(OTHER, at(10), "someone else");
    a.commit_at(ME, at(10), "second");
    b.commit_at(ME, at(-5), "old work");

    let located = locate(Some(dir.path()), &[]).expect("locate");
    let options = ScanOptions::default().author(ME);
    let scans = located
        .repos
        .iter()
        .map(|repo| scan(repo, &day(), &options))
        .collect();
    let activity = aggregate(day(), scans);

    assert_eq!(activity.total_commit_count(), 3);
    assert_eq!(activity.repos_scanned(), 2);
    assert!(activity.group("B").is_none());
    let subjects: Vec<&str> = activity
        .group("A")
        .expect("group A")
        .commits
        .iter()
        .map(|c| c.subject())
        .collect();
    assert_eq!(subjects, vec!["first", "second", "third"]);
}

#[test]
fn test_locator_explicit_valid_and_invalid() {
    let dir = TempTestDir::new("locate-mixed");
    let repo = TestGitRepo::init_in(dir.path(), "real");
    let plain = dir.create_subdir("plain");

    let located = locate(None, &[repo.path().to_path_buf(), plain.clone()]).expect("locate");
    assert_eq!(located.repos.len(), 1);
    assert_eq!(located.repos[0].name, "real");
    assert_eq!(located.dropped.len(), 1);
    assert_eq!(located.dropped[0].path, plain);
}
