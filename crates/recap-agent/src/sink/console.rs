// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{Sink, SinkReceipt, SummaryEntry};
use crate::error::SinkError;

/// Prints the summary to stdout under a banner
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create a console sink
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn banner(entry: &SummaryEntry) -> String {
    let rule = "=".repeat(60);
    format!(
        "\n{rule}\nDAILY WORK SUMMARY - {}\n{rule}\n{}\n",
        entry.date.format("%Y-%m-%d"),
        entry.summary.trim_end()
    )
}

#[async_trait]
impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn persist(&self, entry: &SummaryEntry) -> Result<SinkReceipt, SinkError> {
        let text = banner(entry);
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|source| SinkError::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        Ok(SinkReceipt::at("stdout"))
    }
}
