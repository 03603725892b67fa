//! Interactive confirmation for mutating tools.
//!
//! When the gate is enforced, the operator sees:
//!
//! ```text
//! ⚠️  stop_instance wants to run
//!    Stop a running compute instance (soft stop)
//!    target: ocid1.instance.oc1..aaaa
//! Proceed? [y/N]
//! ```
//!
//! Anything other than `y` / `yes` declines.

use async_trait::async_trait;
use colored::Colorize;
use ociops_application::ports::confirmation::{
    ConfirmationDecision, ConfirmationError, ConfirmationPort,
};
use ociops_application::tool_args_preview;
use ociops_domain::tool::{ToolCall, ToolDefinition};
use std::io::{self, BufRead, Write};

use crate::output::ToolActivity;

/// Terminal `y/N` prompt
pub struct InteractiveConfirmation {
    activity: ToolActivity,
}

impl InteractiveConfirmation {
    /// `activity` is paused for the duration of each prompt.
    pub fn new(activity: ToolActivity) -> Self {
        Self { activity }
    }

    fn render(call: &ToolCall, definition: &ToolDefinition) -> String {
        let mut text = format!(
            "\n{}  {} wants to run\n   {}\n",
            "⚠️".yellow(),
            call.tool_name.yellow().bold(),
            definition.description.dimmed()
        );
        let target = tool_args_preview(call);
        if !target.is_empty() {
            text.push_str(&format!("   target: {}\n", target.cyan()));
        }
        text
    }
}

/// Interpret one line of operator input.
pub fn parse_answer(input: &str) -> ConfirmationDecision {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => ConfirmationDecision::Approve,
        _ => ConfirmationDecision::Decline,
    }
}

fn prompt(text: String) -> Result<String, ConfirmationError> {
    let mut out = io::stdout().lock();
    write!(out, "{}{} ", text, "Proceed? [y/N]".bold())
        .and_then(|_| out.flush())
        .map_err(|e| ConfirmationError::Io(format!("Failed to write prompt: {}", e)))?;
    drop(out);

    let mut input = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| ConfirmationError::Io(format!("Failed to read input: {}", e)))?;
    if read == 0 {
        return Err(ConfirmationError::Cancelled);
    }
    Ok(input)
}

#[async_trait]
impl ConfirmationPort for InteractiveConfirmation {
    async fn confirm(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        self.activity.pause();
        let text = Self::render(call, definition);
        let input = tokio::task::spawn_blocking(move || prompt(text))
            .await
            .map_err(|e| ConfirmationError::Io(e.to_string()));
        self.activity.resume();

        let decision = parse_answer(&input??);
        if decision == ConfirmationDecision::Decline {
            println!("{}", "✗ Declined".red());
        }
        Ok(decision)
    }
}
