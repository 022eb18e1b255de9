// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Daily scheduler
//!
//! [`ScheduleState`] is a plain value holding the `Idle -> Armed -> Firing ->
//! Armed` state machine; it never reads the clock itself. [`Scheduler`] owns
//! one state behind a short-lived lock, drives it from an injected [`Clock`],
//! and hands due slots to a [`DailyJob`].
//!
//! Slots are deduplicated by their local date, so a slot missed while the
//! process was asleep fires once on the next poll and never twice.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use recap_git::window::resolve_local;
use thiserror::Error;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::coordinator::RunReport;
use crate::error::RunError;
use crate::settings::{ScheduleTime, Settings};

// ============================================================================
// Pure state machine
// ============================================================================

/// Scheduler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No slot computed yet
    Idle,
    /// Waiting for `next_fire`
    Armed,
    /// A run is in progress
    Firing,
}

/// A scheduled slot that is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueSlot {
    /// The instant the slot was scheduled for
    pub scheduled: DateTime<Utc>,
    /// The slot's local date
    pub date: NaiveDate,
}

/// The next occurrence of `time` in `tz` strictly after `after`
///
/// Local times that fall in a DST gap move forward to the first valid time.
#[must_use]
pub fn next_occurrence(after: DateTime<Utc>, time: ScheduleTime, tz: Tz) -> DateTime<Utc> {
    let today = after.with_timezone(&tz).date_naive();
    (0..=3)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| resolve_local(tz, date.and_time(time.as_naive_time())))
        .find(|candidate| *candidate > after)
        .unwrap_or(after + chrono::Duration::days(1))
}

/// Scheduler state, owned by exactly one [`Scheduler`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleState {
    phase: Phase,
    next_fire: Option<DateTime<Utc>>,
    last_fired: Option<DateTime<Utc>>,
    last_slot: Option<NaiveDate>,
    time_of_day: ScheduleTime,
    timezone: Tz,
}

impl ScheduleState {
    /// A fresh, idle state
    #[must_use]
    pub fn new(time_of_day: ScheduleTime, timezone: Tz) -> Self {
        Self {
            phase: Phase::Idle,
            next_fire: None,
            last_fired: None,
            last_slot: None,
            time_of_day,
            timezone,
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Next automatic fire time, once armed
    #[must_use]
    pub fn next_fire(&self) -> Option<DateTime<Utc>> {
        self.next_fire
    }

    /// When the last automatic run finished
    #[must_use]
    pub fn last_fired(&self) -> Option<DateTime<Utc>> {
        self.last_fired
    }

    /// Local date of the last slot that fired
    #[must_use]
    pub fn last_slot(&self) -> Option<NaiveDate> {
        self.last_slot
    }

    /// Configured timezone
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Configured time of day
    #[must_use]
    pub fn time_of_day(&self) -> ScheduleTime {
        self.time_of_day
    }

    fn slot_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    fn arm(&mut self, now: DateTime<Utc>) {
        self.next_fire = Some(next_occurrence(now, self.time_of_day, self.timezone));
        if self.phase == Phase::Idle {
            self.phase = Phase::Armed;
        }
    }

    /// Evaluate the state at `now`
    ///
    /// Arms an idle state. Returns the due slot and enters `Firing` when
    /// `now` has reached `next_fire` and that slot has not fired yet. Returns
    /// `None` while a run is in progress.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<DueSlot> {
        match self.phase {
            Phase::Firing => return None,
            Phase::Idle => self.arm(now),
            Phase::Armed => {}
        }

        let scheduled = self.next_fire?;
        if now < scheduled {
            return None;
        }

        let date = self.slot_date(scheduled);
        if self.last_slot.is_some_and(|last| last >= date) {
            debug!(date = %date, "Slot already fired, re-arming");
            self.arm(now.max(scheduled));
            return None;
        }

        self.phase = Phase::Firing;
        Some(DueSlot { scheduled, date })
    }

    /// Record that the run for `slot` finished at `now`, whatever its outcome
    pub fn complete(&mut self, slot: DueSlot, now: DateTime<Utc>) {
        self.last_fired = Some(now);
        self.last_slot = Some(self.last_slot.map_or(slot.date, |last| last.max(slot.date)));
        self.phase = Phase::Armed;
        self.arm(now.max(slot.scheduled));
    }

    /// Enter `Firing` for a manual run; false when a run is already in progress
    pub fn begin_manual(&mut self) -> bool {
        if self.phase == Phase::Firing {
            return false;
        }
        self.phase = Phase::Firing;
        true
    }

    /// Leave `Firing` after a manual run without touching the schedule
    pub fn end_manual(&mut self) {
        self.phase = if self.next_fire.is_some() {
            Phase::Armed
        } else {
            Phase::Idle
        };
    }
}

// ============================================================================
// Runtime
// ============================================================================

/// Source of the current time
pub trait Clock: Send + Sync {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The work a scheduler fires once per slot
#[async_trait]
pub trait DailyJob: Send + Sync + 'static {
    /// Run the job for the local `date`, starting at `now`
    async fn fire(&self, date: NaiveDate, now: DateTime<Utc>) -> Result<RunReport, RunError>;
}

/// How one fired run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The run finished and produced a report
    Completed(Box<RunReport>),
    /// The run aborted with a fatal error
    Failed(RunError),
    /// The run panicked
    Crashed(String),
}

/// Manual trigger errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriggerError {
    /// Another run is in progress
    #[error("A run is already in progress")]
    Busy,
    /// The scheduler was stopped
    #[error("The scheduler is stopped")]
    Stopped,
}

/// Drives a [`ScheduleState`] and fires a [`DailyJob`]
pub struct Scheduler {
    state: Mutex<ScheduleState>,
    job: Arc<dyn DailyJob>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    cancel: CancellationToken,
    idle: Notify,
}

/// Returns a manual run's state to `Armed` even if the caller stops awaiting
struct ManualRun<'a> {
    scheduler: &'a Scheduler,
}

impl Drop for ManualRun<'_> {
    fn drop(&mut self) {
        self.scheduler.lock().end_manual();
        self.scheduler.idle.notify_waiters();
    }
}

impl Scheduler {
    /// Create a scheduler firing `job` daily at `time_of_day` in `timezone`
    pub fn new(job: Arc<dyn DailyJob>, time_of_day: ScheduleTime, timezone: Tz) -> Self {
        Self {
            state: Mutex::new(ScheduleState::new(time_of_day, timezone)),
            job,
            clock: Arc::new(SystemClock),
            poll_interval: Duration::from_secs(30),
            cancel: CancellationToken::new(),
            idle: Notify::new(),
        }
    }

    /// Create a scheduler from resolved settings
    pub fn from_settings(settings: &Settings, job: Arc<dyn DailyJob>) -> Self {
        Self::new(job, settings.schedule_time, settings.timezone)
            .with_poll_interval(settings.poll_interval)
    }

    /// Use another clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Re-check the clock at least this often while waiting
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ScheduleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A snapshot of the current state
    #[must_use]
    pub fn state(&self) -> ScheduleState {
        self.lock().clone()
    }

    /// The next automatic fire time, arming the scheduler if needed
    pub fn next_fire(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        let mut state = self.lock();
        if state.next_fire.is_none() {
            state.arm(now);
        }
        state.next_fire.unwrap_or(now)
    }

    /// Request the run loop to stop
    ///
    /// Takes effect between slots; an in-flight run always finishes.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// A token that is cancelled when the scheduler is stopped
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether a stop was requested
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Poll once, firing the job if a slot is due
    ///
    /// Returns `None` when nothing was due, or when a run is already in
    /// progress, in which case the due slot is picked up by a later tick.
    pub async fn tick(&self) -> Option<RunOutcome> {
        let now = self.clock.now();
        let slot = self.lock().poll(now)?;
        info!(date = %slot.date, scheduled = %slot.scheduled, "Scheduled run firing");

        let outcome = self.execute(slot.date).await;

        let finished = self.clock.now();
        let next = {
            let mut state = self.lock();
            state.complete(slot, finished);
            state.next_fire
        };
        self.idle.notify_waiters();
        if let Some(next) = next {
            info!(next_fire = %next, "Next run scheduled");
        }
        Some(outcome)
    }

    /// Run the job now for today's date
    ///
    /// The automatic schedule is left untouched: the next slot still fires.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::Busy` while another run is in progress and
    /// `TriggerError::Stopped` once [`Scheduler::stop`] was called.
    pub async fn trigger_now(&self) -> Result<RunOutcome, TriggerError> {
        let now = self.clock.now();
        let date = {
            let mut state = self.lock();
            // Checked under the lock so `run` cannot miss a run starting after stop
            if self.cancel.is_cancelled() {
                return Err(TriggerError::Stopped);
            }
            if !state.begin_manual() {
                warn!("Manual trigger rejected: a run is already in progress");
                return Err(TriggerError::Busy);
            }
            state.slot_date(now)
        };
        let _guard = ManualRun { scheduler: self };

        info!(date = %date, "Manual run firing");
        Ok(self.execute(date).await)
    }

    async fn execute(&self, date: NaiveDate) -> RunOutcome {
        let job = Arc::clone(&self.job);
        let now = self.clock.now();
        // Panics in the job stay inside the spawned task
        match tokio::spawn(async move { job.fire(date, now).await }).await {
            Ok(Ok(report)) => {
                info!(
                    run_id = %report.run_id,
                    commits = report.total_commit_count,
                    succeeded = report.succeeded(),
                    "Run finished"
                );
                RunOutcome::Completed(Box::new(report))
            }
            Ok(Err(e)) => {
                error!(error = %e, "Run failed");
                RunOutcome::Failed(e)
            }
            Err(e) => {
                error!(error = %e, "Run crashed");
                RunOutcome::Crashed(e.to_string())
            }
        }
    }

    /// How long the run loop sleeps before the next tick
    ///
    /// A slot that is due while another run holds `Firing` is re-checked after
    /// `poll_interval` or when that run ends, whichever comes first.
    fn wait_duration(&self) -> Duration {
        let now = self.clock.now();
        let state = self.lock();
        if state.phase() == Phase::Firing {
            return self.poll_interval;
        }
        state
            .next_fire
            .and_then(|next| (next - now).to_std().ok())
            .filter(|until| !until.is_zero())
            .map_or(self.poll_interval, |until| until.min(self.poll_interval))
    }

    /// Wait until no run holds `Firing`
    async fn wait_until_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            // Register before checking so a run ending in between still wakes us
            notified.as_mut().enable();
            let firing = self.lock().phase() == Phase::Firing;
            if !firing {
                return;
            }
            notified.await;
        }
    }

    /// Run until [`Scheduler::stop`] is called
    ///
    /// Returns only after any in-flight run, manual ones included, finished.
    pub async fn run(&self) {
        info!(next_fire = %self.next_fire(), "Scheduler started");
        while !self.cancel.is_cancelled() {
            let _ = self.tick().await;
            let wait = self.wait_duration();
            tokio::select! {
                () = self.cancel.cancelled() => break,
                () = self.idle.notified() => {}
                () = tokio::time::sleep(wait) => {}
            }
        }
        let firing = self.lock().phase() == Phase::Firing;
        if firing {
            info!("Waiting for the in-flight run to finish");
        }
        self.wait_until_idle().await;
        info!("Scheduler stopped");
    }
}
