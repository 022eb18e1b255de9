// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use super::{Sink, SinkReceipt, SummaryEntry};
use crate::error::SinkError;
use crate::report::report_file_name;

/// Writes `daily_summary_YYYY-MM-DD.md` into a directory
///
/// A second run for the same date replaces the earlier file.
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
}

impl FileSink {
    /// Sink writing into `output_dir`, created on first use
    #[must_use]
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

#[async_trait]
impl Sink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn persist(&self, entry: &SummaryEntry) -> Result<SinkReceipt, SinkError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| SinkError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        let path = self.output_dir.join(report_file_name(entry.date));
        tokio::fs::write(&path, &entry.report)
            .await
            .map_err(|source| SinkError::Io {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), "Summary saved");
        Ok(SinkReceipt::at(path.display().to_string()))
    }
}
