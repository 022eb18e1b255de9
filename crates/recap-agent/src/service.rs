// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Service definitions for running `recap start` in the background

use std::path::PathBuf;

/// Launchd job label
pub const LAUNCHD_LABEL: &str = "com.recap.daily-summary";

/// Service manager flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// systemd user unit
    Systemd,
    /// launchd agent plist
    Launchd,
}

impl ServiceKind {
    /// The native service manager for this platform
    #[must_use]
    pub fn for_platform() -> Self {
        if cfg!(target_os = "macos") {
            Self::Launchd
        } else {
            Self::Systemd
        }
    }

    /// Pick a kind from the `--systemd` / `--launchd` flags
    #[must_use]
    pub fn from_flags(systemd: bool, launchd: bool) -> Self {
        match (systemd, launchd) {
            (true, _) => Self::Systemd,
            (_, true) => Self::Launchd,
            _ => Self::for_platform(),
        }
    }

    /// Where the definition is usually installed
    #[must_use]
    pub fn install_hint(self) -> &'static str {
        match self {
            Self::Systemd => "~/.config/systemd/user/recap.service",
            Self::Launchd => "~/Library/LaunchAgents/com.recap.daily-summary.plist",
        }
    }
}

/// What the service runs
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    /// Path to the recap executable
    pub executable: PathBuf,
    /// Config file passed with `--config`
    pub config: Option<PathBuf>,
    /// Directory for launchd stdout/stderr logs
    pub log_dir: PathBuf,
}

impl ServiceSpec {
    /// Spec for the running executable
    #[must_use]
    pub fn current(config: Option<PathBuf>) -> Self {
        let executable = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("recap"));
        let log_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recap");
        Self {
            executable,
            config,
            log_dir,
        }
    }

    fn arguments(&self) -> Vec<String> {
        let mut args = vec![self.executable.display().to_string()];
        if let Some(config) = &self.config {
            args.push("--config".to_string());
            args.push(config.display().to_string());
        }
        args.push("start".to_string());
        args
    }
}

/// Render a service definition
#[must_use]
pub fn render(kind: ServiceKind, spec: &ServiceSpec) -> String {
    match kind {
        ServiceKind::Systemd => systemd_unit(spec),
        ServiceKind::Launchd => launchd_plist(spec),
    }
}

fn systemd_unit(spec: &ServiceSpec) -> String {
    let exec = spec
        .arguments()
        .iter()
        .map(|arg| {
            if arg.contains(char::is_whitespace) {
                format!("\"{arg}\"")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "[Unit]
Description=recap daily git work summary
After=network-online.target

[Service]
Type=simple
ExecStart={exec}
Environment=RUST_LOG=info
# Environment=ANTHROPIC_API_KEY=your-api-key-here
Restart=on-failure
RestartSec=10

[Install]
WantedBy=default.target
"
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn launchd_plist(spec: &ServiceSpec) -> String {
    let args: String = spec
        .arguments()
        .iter()
        .map(|arg| format!("        <string>{}</string>\n", xml_escape(arg)))
        .collect();
    let log = |name: &str| xml_escape(&spec.log_dir.join(name).display().to_string());

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{LAUNCHD_LABEL}</string>
    <key>ProgramArguments</key>
    <array>
{args}    </array>
    <key>EnvironmentVariables</key>
    <dict>
        <key>ANTHROPIC_API_KEY</key>
        <string>your-api-key-here</string>
    </dict>
    <key>RunAtLoad</key>
    <true/>
    <key>KeepAlive</key>
    <true/>
    <key>StandardOutPath</key>
    <string>{}</string>
    <key>StandardErrorPath</key>
    <string>{}</string>
</dict>
</plist>
"#,
        log("recap.log"),
        log("recap.error.log"),
    )
}
