// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Markdown rendering of activity and finished reports

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use recap_git::{ActivityRecord, AuthorScope, RepoActivity};

/// File name for the report covering `date`
#[must_use]
pub fn report_file_name(date: NaiveDate) -> String {
    format!("daily_summary_{}.md", date.format("%Y-%m-%d"))
}

/// Render the raw activity as markdown
///
/// This is both the summarizer's input and the collapsible raw-data section
/// of the saved report.
#[must_use]
pub fn render_activity(activity: &ActivityRecord, tz: Tz) -> String {
    let date = activity.window().local_date(tz);
    let mut lines = vec![
        "# Daily Git Activity Report".to_string(),
        format!("**Date:** {}", date.format("%Y-%m-%d %A")),
        format!("**Author:** {}", describe_authors(activity.groups())),
        format!("**Repositories Scanned:** {}", activity.repos_scanned()),
        format!("**Total Commits:** {}", activity.total_commit_count()),
    ];
    let all_authors = activity.all_author_repos();
    if !all_authors.is_empty() {
        lines.push(format!(
            "**Note:** no git identity configured, all authors included for: {}",
            all_authors.join(", ")
        ));
    }
    lines.push(String::new());

    for group in activity.groups() {
        render_group(&mut lines, group, tz);
    }

    if activity.is_empty() {
        lines.push("## No Git Activity Today".to_string());
        lines.push("No commits found in any of the scanned repositories for today.".to_string());
    }

    if !activity.warnings().is_empty() {
        lines.push(String::new());
        lines.push("## Scan Warnings".to_string());
        for warning in activity.warnings() {
            lines.push(format!("- `{}`: {}", warning.repo, warning.message));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn describe_authors(groups: &[RepoActivity]) -> String {
    let mut emails: Vec<&str> = groups.iter().filter_map(|g| g.author.email()).collect();
    emails.sort_unstable();
    emails.dedup();
    match (emails.is_empty(), groups.iter().any(|g| g.author == AuthorScope::AllAuthors)) {
        (true, true) => "all authors".to_string(),
        (true, false) => "(detected per repository)".to_string(),
        (false, _) => emails.join(", "),
    }
}

/// Push a fenced code block
fn push_fenced(lines: &mut Vec<String>, body: impl IntoIterator<Item = String>) {
    lines.push("```".to_string());
    lines.extend(body);
    lines.push("```".to_string());
    lines.push(String::new());
}

fn render_group(lines: &mut Vec<String>, group: &RepoActivity, tz: Tz) {
    lines.push(format!("## Repository: {}", group.repo.name));
    lines.push(format!("**Path:** `{}`", group.repo.path.display()));
    if let Some(branch) = &group.branch {
        lines.push(format!("**Current Branch:** `{branch}`"));
    }
    lines.push(String::new());

    lines.push("### Commits Today".to_string());
    let commits = group.commits.iter().map(|commit| {
        let mut line = format!(
            "{} | {} | {}",
            commit.short_hash(),
            commit.timestamp.with_timezone(&tz).format("%H:%M"),
            commit.subject()
        );
        if !group.author.is_filtered() {
            line.push_str(&format!(" | {}", commit.author_email));
        }
        line
    });
    push_fenced(lines, commits);

    let files = group.files_changed();
    if !files.is_empty() {
        lines.push("### Files Changed".to_string());
        push_fenced(lines, files.into_iter().map(ToString::to_string));

        let (insertions, deletions) = group.line_stats();
        lines.push("### Diff Statistics".to_string());
        let per_commit = group.commits.iter().filter_map(|commit| {
            commit.diff.as_ref().map(|diff| {
                format!(
                    "{}: {} files changed, {} insertions(+), {} deletions(-)",
                    commit.short_hash(),
                    diff.files_changed,
                    diff.insertions,
                    diff.deletions
                )
            })
        });
        let total = format!("total: {insertions} insertions(+), {deletions} deletions(-)");
        push_fenced(lines, per_commit.chain(std::iter::once(total)));
    }

    lines.push("---".to_string());
    lines.push(String::new());
}

/// Render the saved report: summary followed by the raw activity
#[must_use]
pub fn render_full_report(summary: &str, raw_activity: &str, generated_at: DateTime<Tz>) -> String {
    format!(
        "# Daily Work Summary\n\
         **Generated:** {}\n\
         \n\
         ---\n\
         \n\
         {}\n\
         \n\
         ---\n\
         \n\
         ## Raw Git Data\n\
         \n\
         <details>\n\
         <summary>Click to expand raw git activity</summary>\n\
         \n\
         {}\n\
         \n\
         </details>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        summary.trim(),
        raw_activity.trim_end()
    )
}
