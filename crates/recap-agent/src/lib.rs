// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! recap-agent library
//!
//! Settings resolution, the run coordinator, the daily scheduler, and the
//! summarizer and sink collaborators behind the `recap` binary. Exported as a
//! library for integration tests.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod service;
pub mod settings;
pub mod sink;
pub mod summarizer;

pub use coordinator::{RunCoordinator, RunReport, SinkReport, SummaryStatus};
pub use error::{RunError, SetupError, SinkError, SummarizationError};
pub use scheduler::{Clock, DailyJob, RunOutcome, ScheduleState, Scheduler, SystemClock, TriggerError};
pub use settings::{ConfigError, ScheduleTime, Settings, SettingsLayer};
pub use sink::{Sink, SinkReceipt, SummaryEntry};
pub use summarizer::Summarizer;
