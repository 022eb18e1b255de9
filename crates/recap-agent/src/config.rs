// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for the recap binary
//!
//! The CLI is the highest-precedence settings layer. Flags that are not given
//! leave the corresponding field unset so the config file, the environment or
//! the built-in defaults can fill it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::SettingsLayer;

/// recap - daily summaries of your git activity
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "recap")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to `start`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a JSON config file
    ///
    /// Defaults to ./recap.json, then the platform config directory
    /// (e.g. ~/.config/recap/config.json).
    #[arg(short, long, global = true, env = "RECAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so console summaries on stdout stay clean.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the daily scheduler in the foreground
    ///
    /// On Unix, send SIGUSR1 to trigger a run immediately.
    Start(RunArgs),

    /// Collect, summarize and save today's activity once, now
    Run(RunArgs),

    /// Print the next scheduled run time
    Next,

    /// Write a starter config file
    InitConfig {
        /// Where to write it (defaults to the platform config directory)
        path: Option<PathBuf>,
    },

    /// Print a service definition for running `recap start` in the background
    Service {
        /// systemd user unit (default on Linux)
        #[arg(long, conflicts_with = "launchd")]
        systemd: bool,

        /// launchd agent plist (default on macOS)
        #[arg(long)]
        launchd: bool,
    },
}

/// Settings overrides shared by `start` and `run`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Parent directory containing repositories
    #[arg(long, value_name = "DIR")]
    pub repos_dir: Option<PathBuf>,

    /// Specific repositories to scan instead of the parent directory
    #[arg(long, value_name = "PATH", num_args = 1.., value_delimiter = ',')]
    pub repos: Vec<PathBuf>,

    /// Only include commits by this email
    #[arg(long, value_name = "EMAIL")]
    pub author: Option<String>,

    /// Directory for summary files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the summary without writing a file
    #[arg(long, default_value = "false")]
    pub print_only: bool,

    /// Also save the summary to Notion
    #[arg(long, default_value = "false")]
    pub notion: bool,

    /// Skip days without commits
    #[arg(long, default_value = "false")]
    pub skip_empty: bool,
}

impl RunArgs {
    /// The settings layer these flags describe
    #[must_use]
    pub fn to_layer(&self) -> SettingsLayer {
        SettingsLayer {
            repos_parent_dir: self.repos_dir.clone(),
            specific_repos: (!self.repos.is_empty()).then(|| self.repos.clone()),
            author_email: self.author.clone(),
            output_dir: self.output_dir.clone(),
            save_to_file: self.print_only.then_some(false),
            print_to_console: self.print_only.then_some(true),
            notion_enabled: self.notion.then_some(true),
            skip_empty_days: self.skip_empty.then_some(true),
            ..SettingsLayer::default()
        }
    }
}

impl Config {
    /// The subcommand to execute, `start` when none was given
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Start(RunArgs::default()))
    }

    /// Settings overrides from the command line
    #[must_use]
    pub fn overrides(&self) -> SettingsLayer {
        match &self.command {
            Some(Command::Start(args) | Command::Run(args)) => args.to_layer(),
            _ => SettingsLayer::default(),
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Default location for `init-config`
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recap")
        .join("config.json")
}
