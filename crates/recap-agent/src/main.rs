// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! recap: daily summaries of your git activity
//!
//! `recap start` runs the scheduler in the foreground, `recap run` produces
//! today's summary once, and `recap next` shows when the next run is due.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use recap_agent::config::{Command, Config, default_config_path};
use recap_agent::scheduler::{RunOutcome, Scheduler, next_occurrence};
use recap_agent::service::{ServiceKind, ServiceSpec, render};
use recap_agent::settings::{self, SettingsLayer};
use recap_agent::RunCoordinator;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr so console summaries on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match config.subcommand() {
        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(default_config_path);
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            SettingsLayer::sample().write_to(&path)?;
            println!("Wrote {}", path.display());
        }
        Command::Service { systemd, launchd } => {
            let kind = ServiceKind::from_flags(systemd, launchd);
            print!("{}", render(kind, &ServiceSpec::current(config.config.clone())));
            eprintln!("Install to {}", kind.install_hint());
        }
        Command::Next => {
            let settings = settings::load(config.overrides(), config.config.as_deref())?;
            let next = next_occurrence(Utc::now(), settings.schedule_time, settings.timezone);
            println!(
                "{} ({})",
                next.with_timezone(&settings.timezone).format("%Y-%m-%d %H:%M %Z"),
                settings.timezone
            );
        }
        Command::Run(_) => {
            let settings = settings::load(config.overrides(), config.config.as_deref())?;
            let coordinator = RunCoordinator::from_settings(settings)?;
            let report = coordinator
                .run(Utc::now())
                .await
                .context("run aborted")?;
            info!(report = %serde_json::to_string(&report)?, "Run report");
            if !report.succeeded() {
                anyhow::bail!("run finished with failures");
            }
        }
        Command::Start(_) => {
            let settings = settings::load(config.overrides(), config.config.as_deref())?;
            info!(
                time = %settings.schedule_time,
                timezone = %settings.timezone,
                "Daily summary scheduled"
            );
            let scheduler = Scheduler::from_settings(
                &settings,
                Arc::new(RunCoordinator::from_settings(settings.clone())?),
            );
            run_daemon(Arc::new(scheduler)).await?;
        }
    }

    Ok(())
}

/// Run the scheduler until Ctrl-C or SIGTERM, with SIGUSR1 as a manual trigger
async fn run_daemon(scheduler: Arc<Scheduler>) -> Result<()> {
    let token = scheduler.cancellation_token();

    tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move {
            wait_for_shutdown().await;
            info!("Shutdown requested, stopping after any in-flight run");
            scheduler.stop();
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut manual = signal(SignalKind::user_defined1()).context("installing SIGUSR1 handler")?;
        let scheduler = Arc::clone(&scheduler);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    received = manual.recv() => {
                        if received.is_none() {
                            break;
                        }
                        info!("SIGUSR1 received, running now");
                        let scheduler = Arc::clone(&scheduler);
                        tokio::spawn(async move {
                            match scheduler.trigger_now().await {
                                Ok(RunOutcome::Completed(_)) => {}
                                Ok(_) => warn!("Manual run did not complete"),
                                Err(e) => warn!(error = %e, "Manual run skipped"),
                            }
                        });
                    }
                }
            }
        });
    }
    #[cfg(not(unix))]
    drop(token);

    scheduler.run().await;
    Ok(())
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "Cannot listen for SIGTERM");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
