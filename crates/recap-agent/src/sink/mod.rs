// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Sink collaborators
//!
//! A sink persists one finished summary somewhere. The coordinator calls every
//! configured sink independently and records each outcome on its own.

mod console;
mod file;
mod notion;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use recap_git::ActivityRecord;
use serde::Serialize;

use crate::error::SinkError;
use crate::settings::Settings;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use notion::{NotionSink, extract_work_summary, markdown_to_blocks};

/// Everything a sink may persist for one run
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    /// The activity that was summarized
    pub activity: Arc<ActivityRecord>,
    /// Summary text from the summarizer
    pub summary: String,
    /// Full markdown report (summary plus raw activity)
    pub report: String,
    /// Local date the window covers
    pub date: NaiveDate,
    /// When the report was generated, in the configured timezone
    pub generated_at: DateTime<Tz>,
}

impl SummaryEntry {
    /// Names of repositories with activity, in activity order
    #[must_use]
    pub fn repository_names(&self) -> Vec<&str> {
        self.activity
            .groups()
            .iter()
            .map(|g| g.repo.name.as_str())
            .collect()
    }
}

/// What a successful persist produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkReceipt {
    /// Where the summary went: a file path, a page URL, or a short note
    pub location: String,
}

impl SinkReceipt {
    /// Receipt pointing at `location`
    #[must_use]
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Persists finished summaries
#[async_trait]
pub trait Sink: Send + Sync {
    /// Short stable name used in logs and run reports
    fn name(&self) -> &str;

    /// Persist one entry
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the entry could not be persisted.
    async fn persist(&self, entry: &SummaryEntry) -> Result<SinkReceipt, SinkError>;
}

/// Build the sinks enabled in `settings`, in file, console, Notion order
///
/// # Errors
///
/// Returns `SinkError` if an enabled sink cannot be constructed.
pub fn sinks_from_settings(settings: &Settings) -> Result<Vec<Arc<dyn Sink>>, SinkError> {
    let mut sinks: Vec<Arc<dyn Sink>> = Vec::new();
    if settings.save_to_file {
        sinks.push(Arc::new(FileSink::new(settings.output_dir.clone())));
    }
    if settings.print_to_console {
        sinks.push(Arc::new(ConsoleSink::new()));
    }
    if settings.notion_enabled {
        sinks.push(Arc::new(NotionSink::from_settings(settings)?));
    }
    Ok(sinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Secret, Settings};
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_sinks() {
        let sinks = sinks_from_settings(&Settings::default()).unwrap();
        let names: Vec<&str> = sinks.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["file", "console"]);
    }

    #[test]
    fn test_notion_sink_enabled() {
        let settings = Settings {
            save_to_file: false,
            print_to_console: false,
            notion_enabled: true,
            notion_api_key: Some(Secret::new("secret_abc")),
            notion_database_id: Some("db123".into()),
            ..Settings::default()
        };
        let sinks = sinks_from_settings(&settings).unwrap();
        let names: Vec<&str> = sinks.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["notion"]);
    }

    #[test]
    fn test_notion_without_credentials_is_an_error() {
        let settings = Settings {
            notion_enabled: true,
            ..Settings::default()
        };
        assert!(matches!(
            sinks_from_settings(&settings),
            Err(SinkError::MissingCredentials(_))
        ));
    }
}
