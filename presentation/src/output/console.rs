//! Console narration for agent sessions
//!
//! Text fragments go to stdout the moment they arrive. While a tool runs
//! a spinner is drawn on stderr; it is cleared when the tool returns.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use ociops_application::ports::narration::NarrationSink;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct ActivityState {
    spinner: Option<ProgressBar>,
    paused: bool,
}

/// Shared handle on the tool spinner
///
/// Cloned into the confirmation prompt so the spinner never draws over it.
#[derive(Clone, Default)]
pub struct ToolActivity {
    state: Arc<Mutex<ActivityState>>,
}

impl ToolActivity {
    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, name: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.paused {
            return;
        }
        if let Some(previous) = state.spinner.take() {
            previous.finish_and_clear();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_prefix("tool");
        pb.set_message(format!("{}...", name));
        pb.enable_steady_tick(Duration::from_millis(100));
        state.spinner = Some(pb);
    }

    fn finish(&self) {
        if let Ok(mut state) = self.state.lock()
            && let Some(pb) = state.spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    /// Clear the spinner and keep it off until [`resume`](Self::resume).
    pub fn pause(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.paused = true;
            if let Some(pb) = state.spinner.take() {
                pb.finish_and_clear();
            }
        }
    }

    pub fn resume(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.paused = false;
        }
    }

    fn is_active(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.spinner.is_some())
            .unwrap_or(false)
    }
}

/// Streams a session to the terminal
pub struct ConsoleNarrator {
    activity: ToolActivity,
    show_tool_activity: bool,
    at_line_start: AtomicBool,
}

impl ConsoleNarrator {
    pub fn new(show_tool_activity: bool) -> Self {
        Self {
            activity: ToolActivity::default(),
            show_tool_activity,
            at_line_start: AtomicBool::new(true),
        }
    }

    /// Handle for components that must pause the spinner.
    pub fn activity(&self) -> ToolActivity {
        self.activity.clone()
    }

    /// The line printed when a session ends in error.
    pub fn error_line(message: &str) -> String {
        format!(
            "{} Session ended with error: {}",
            "[Error]".red().bold(),
            message
        )
    }

    fn write_stdout(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
        if let Some(last) = text.chars().last() {
            self.at_line_start.store(last == '\n', Ordering::Relaxed);
        }
    }

    fn finish_line(&self) {
        if !self.at_line_start.load(Ordering::Relaxed) {
            self.write_stdout("\n");
        }
    }
}

impl Default for ConsoleNarrator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NarrationSink for ConsoleNarrator {
    fn on_text(&self, fragment: &str) {
        if self.activity.is_active() {
            self.activity.finish();
        }
        self.write_stdout(fragment);
    }

    fn on_tool_start(&self, name: &str) {
        if self.show_tool_activity {
            self.activity.start(name);
        }
    }

    fn on_tool_end(&self, name: &str, is_error: bool) {
        self.activity.finish();
        if self.show_tool_activity && is_error {
            eprintln!("{} {} failed", "x".red(), name.dimmed());
        }
    }

    fn on_session_error(&self, message: &str) {
        self.activity.finish();
        self.finish_line();
        println!("{}", Self::error_line(message));
    }

    fn on_session_end(&self) {
        self.activity.finish();
        self.finish_line();
    }
}
