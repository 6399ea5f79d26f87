//! Desktop integration: dmenu-style menu prompts, notifications and clipboard.
//!
//! Commands are spawned directly with arguments; menu options are written to
//! the menu's stdin, one per line.

use crate::config::DesktopConfig;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Desktop services used by the interactive flows.
pub trait Desktop {
    /// Show `lines` in a menu and return the selected or typed line.
    /// None when the menu was dismissed or returned nothing.
    fn choose(&self, lines: &[String]) -> Option<String>;

    fn notify(&self, title: &str, body: &str, icon: Option<&str>);

    /// Current clipboard text, trimmed.
    fn clipboard(&self) -> Option<String>;

    /// Menu whose first line is the prompt. Selecting the prompt line itself counts as no answer.
    fn prompt(&self, prompt: &str, options: &[String]) -> Option<String> {
        let mut lines = Vec::with_capacity(options.len() + 1);
        lines.push(prompt.to_string());
        lines.extend(options.iter().cloned());
        self.choose(&lines).filter(|answer| answer != prompt)
    }
}

/// Desktop backed by external commands (`walker --dmenu`, `notify-send`, `wl-paste`).
pub struct ShellDesktop {
    config: DesktopConfig,
}

impl ShellDesktop {
    pub fn new(config: DesktopConfig) -> Self {
        Self { config }
    }
}

impl Desktop for ShellDesktop {
    fn choose(&self, lines: &[String]) -> Option<String> {
        let (program, args) = self.config.dmenu_command.split_first()?;
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!(command = %program, error = %e, "Failed to start menu");
                return None;
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(lines.join("\n").as_bytes()) {
                warn!(error = %e, "Failed to write menu options");
            }
        }

        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "Menu did not complete");
                return None;
            }
        };
        if !output.status.success() {
            debug!(status = %output.status, "Menu dismissed");
            return None;
        }

        let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!answer.is_empty()).then_some(answer)
    }

    fn notify(&self, title: &str, body: &str, icon: Option<&str>) {
        let mut command = Command::new(&self.config.notify_command);
        command.arg(title).arg(body);
        if let Some(icon) = icon {
            command.arg("-i").arg(icon);
        }
        match command.stdout(Stdio::null()).stderr(Stdio::null()).status() {
            Ok(status) if status.success() => {}
            Ok(status) => debug!(status = %status, "Notification command failed"),
            Err(e) => warn!(command = %self.config.notify_command, error = %e, "Failed to send notification"),
        }
    }

    fn clipboard(&self) -> Option<String> {
        let output = Command::new(&self.config.clipboard_command)
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}
