// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end run orchestration
//!
//! One run locates repositories, scans them in parallel, aggregates the
//! results, asks the summarizer for text and hands it to every sink. Only a
//! locate failure aborts the run; every later failure is recorded in the
//! [`RunReport`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use recap_git::{
    ActivityRecord, AuthorScope, DroppedPath, RepoScan, RepositoryRef, ScanOptions, ScanWarning,
    TimeWindow, aggregate, locate, scan,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{RunError, SetupError, SinkError, SummarizationError};
use crate::report::{render_activity, render_full_report};
use crate::scheduler::{Clock, DailyJob, SystemClock};
use crate::settings::Settings;
use crate::sink::{Sink, SummaryEntry, sinks_from_settings};
use crate::summarizer::{AnthropicSummarizer, Summarizer};

/// What happened to the summarization step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryStatus {
    /// A summary was produced
    Generated {
        /// Length of the summary in characters
        chars: usize,
    },
    /// The summarizer failed; no sink was called
    Failed {
        /// Error message
        error: String,
    },
    /// The day had no commits and empty days are skipped
    SkippedEmpty,
}

/// What happened to one sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkReport {
    /// Sink name
    pub sink: String,
    /// Where the summary went, on success
    pub location: Option<String>,
    /// Error message, on failure
    pub error: Option<String>,
}

impl SinkReport {
    /// Whether the sink persisted the summary
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique id of the run, also used in logs
    pub run_id: Uuid,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// The window that was scanned
    pub window: TimeWindow,
    /// Local date the window covers
    pub date: NaiveDate,
    /// Number of repositories scanned
    pub repos_scanned: usize,
    /// Explicitly listed paths that were not repositories
    pub dropped: Vec<DroppedPath>,
    /// Commits found across all repositories
    pub total_commit_count: usize,
    /// Repositories with activity, in scan order
    pub repositories: Vec<String>,
    /// Repositories that could not be scanned
    pub warnings: Vec<ScanWarning>,
    /// Summarization outcome
    pub summary: SummaryStatus,
    /// Per-sink outcomes, in sink order
    pub sinks: Vec<SinkReport>,
}

impl RunReport {
    pub(crate) fn new(run_id: Uuid, started_at: DateTime<Utc>, window: TimeWindow, date: NaiveDate) -> Self {
        Self {
            run_id,
            started_at,
            finished_at: started_at,
            window,
            date,
            repos_scanned: 0,
            dropped: Vec::new(),
            total_commit_count: 0,
            repositories: Vec::new(),
            warnings: Vec::new(),
            summary: SummaryStatus::SkippedEmpty,
            sinks: Vec::new(),
        }
    }

    /// Whether summarization and every sink succeeded
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !matches!(self.summary, SummaryStatus::Failed { .. })
            && self.sinks.iter().all(SinkReport::succeeded)
    }
}

/// Orchestrates one run from locate to sinks
pub struct RunCoordinator {
    settings: Settings,
    summarizer: Arc<dyn Summarizer>,
    sinks: Vec<Arc<dyn Sink>>,
    clock: Arc<dyn Clock>,
}

impl RunCoordinator {
    /// Coordinator with an explicit summarizer and no sinks
    pub fn new(settings: Settings, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            settings,
            summarizer,
            sinks: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Read finish and generation times from `clock`
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Add a sink; sinks run in the order they were added
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Coordinator using the Anthropic summarizer and the sinks enabled in `settings`
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the summarizer or an enabled sink cannot be built.
    pub fn from_settings(settings: Settings) -> Result<Self, SetupError> {
        let summarizer = Arc::new(AnthropicSummarizer::from_settings(&settings)?);
        let sinks = sinks_from_settings(&settings)?;
        Ok(Self {
            settings,
            summarizer,
            sinks,
            clock: Arc::new(SystemClock),
        })
    }

    /// The settings this coordinator runs with
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run for the local day containing `now`
    ///
    /// # Errors
    ///
    /// Returns `RunError::Configuration` when there is no repository path to
    /// check at all.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunReport, RunError> {
        let date = now.with_timezone(&self.settings.timezone).date_naive();
        self.run_for(date, now).await
    }

    /// Run for the local `date`
    ///
    /// # Errors
    ///
    /// Returns `RunError::Configuration` when there is no repository path to
    /// check at all.
    pub async fn run_for(&self, date: NaiveDate, now: DateTime<Utc>) -> Result<RunReport, RunError> {
        let tz = self.settings.timezone;
        let window = TimeWindow::for_date(date, tz);
        let mut report = RunReport::new(Uuid::new_v4(), now, window, date);
        info!(run_id = %report.run_id, date = %date, "Run started");

        let located = locate(self.settings.parent_dir(), &self.settings.specific_repos)?;
        report.dropped = located.dropped;

        let scans = self.scan_all(located.repos, window).await;
        let activity = Arc::new(aggregate(window, scans));
        report.repos_scanned = activity.repos_scanned();
        report.total_commit_count = activity.total_commit_count();
        report.repositories = activity
            .groups()
            .iter()
            .map(|g| g.repo.name.clone())
            .collect();
        report.warnings = activity.warnings().to_vec();
        info!(
            run_id = %report.run_id,
            repos = report.repos_scanned,
            commits = report.total_commit_count,
            warnings = report.warnings.len(),
            "Activity collected"
        );

        if activity.is_empty() && self.settings.skip_empty_days {
            info!(run_id = %report.run_id, "No commits today, skipping summary");
            report.summary = SummaryStatus::SkippedEmpty;
            report.finished_at = self.clock.now();
            return Ok(report);
        }

        let summary = match self.summarize(Arc::clone(&activity)).await {
            Ok(text) => text,
            Err(e) => {
                error!(run_id = %report.run_id, error = %e, "Summarization failed");
                report.summary = SummaryStatus::Failed {
                    error: e.to_string(),
                };
                report.finished_at = self.clock.now();
                return Ok(report);
            }
        };
        report.summary = SummaryStatus::Generated {
            chars: summary.chars().count(),
        };

        let generated_at = self.clock.now().with_timezone(&tz);
        let raw = render_activity(&activity, tz);
        let entry = Arc::new(SummaryEntry {
            report: render_full_report(&summary, &raw, generated_at),
            activity,
            summary,
            date,
            generated_at,
        });
        report.sinks = self.persist_all(&entry).await;

        report.finished_at = self.clock.now();
        info!(
            run_id = %report.run_id,
            succeeded = report.succeeded(),
            "Run completed"
        );
        Ok(report)
    }

    async fn scan_all(&self, repos: Vec<RepositoryRef>, window: TimeWindow) -> Vec<RepoScan> {
        let mut options = ScanOptions {
            author_email: self.settings.author_email.clone(),
            include_diff: false,
        };
        if self.settings.include_diffs {
            options = options.with_diff();
        }

        let handles: Vec<_> = repos
            .into_iter()
            .map(|repo| {
                let options = options.clone();
                let task_repo = repo.clone();
                let handle =
                    tokio::task::spawn_blocking(move || scan(&task_repo, &window, &options));
                (repo, handle)
            })
            .collect();

        // Join barrier: every scan finishes or fails before aggregation
        let mut scans = Vec::with_capacity(handles.len());
        for (repo, handle) in handles {
            match handle.await {
                Ok(result) => scans.push(result),
                Err(e) => {
                    warn!(repo = %repo.name, error = %e, "Scan task failed");
                    scans.push(RepoScan {
                        warning: Some(ScanWarning {
                            repo: repo.name.clone(),
                            message: format!("scan task failed: {e}"),
                        }),
                        repo,
                        commits: Vec::new(),
                        author: AuthorScope::AllAuthors,
                        branch: None,
                    });
                }
            }
        }
        scans
    }

    async fn summarize(&self, activity: Arc<ActivityRecord>) -> Result<String, SummarizationError> {
        let summarizer = Arc::clone(&self.summarizer);
        let limit = self.settings.summarizer_timeout;
        bounded(
            limit,
            async move { summarizer.summarize(&activity).await },
            SummarizationError::Timeout,
            SummarizationError::Aborted,
        )
        .await
    }

    async fn persist_all(&self, entry: &Arc<SummaryEntry>) -> Vec<SinkReport> {
        let limit = self.settings.sink_timeout;
        let mut reports = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            let name = sink.name().to_string();
            let task_sink = Arc::clone(sink);
            let task_entry = Arc::clone(entry);
            let result = bounded(
                limit,
                async move { task_sink.persist(&task_entry).await },
                SinkError::Timeout,
                SinkError::Aborted,
            )
            .await;

            reports.push(match result {
                Ok(receipt) => {
                    debug!(sink = %name, location = %receipt.location, "Sink succeeded");
                    SinkReport {
                        sink: name,
                        location: Some(receipt.location),
                        error: None,
                    }
                }
                Err(e) => {
                    warn!(sink = %name, error = %e, "Sink failed");
                    SinkReport {
                        sink: name,
                        location: None,
                        error: Some(e.to_string()),
                    }
                }
            });
        }
        reports
    }
}

/// Run `task` on its own tokio task with a deadline
///
/// A timeout aborts the task. A panic is reported through `aborted`.
async fn bounded<T, E>(
    limit: Duration,
    task: impl Future<Output = Result<T, E>> + Send + 'static,
    timed_out: impl FnOnce(Duration) -> E,
    aborted: impl FnOnce(String) -> E,
) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    let handle = tokio::spawn(task);
    let abort = handle.abort_handle();
    match tokio::time::timeout(limit, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(aborted(join.to_string())),
        Err(_) => {
            abort.abort();
            Err(timed_out(limit))
        }
    }
}

#[async_trait]
impl DailyJob for RunCoordinator {
    async fn fire(&self, date: NaiveDate, now: DateTime<Utc>) -> Result<RunReport, RunError> {
        self.run_for(date, now).await
    }
}
