//! Terminal prompts via dialoguer, skipped when stdin is not a terminal.

use anyhow::Result;
use dialoguer::{Confirm, Input};
use exthash_core::prompt::{NonInteractive, Prompter};
use std::io::IsTerminal;

pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn detect() -> Self {
        let interactive = std::io::stdin().is_terminal();
        if !interactive {
            tracing::info!("stdin is not a terminal; prompts will be skipped");
        }
        Self { interactive }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str) -> Result<bool> {
        if !self.interactive {
            return NonInteractive.confirm(question);
        }
        Ok(Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()?)
    }

    fn input(&self, question: &str) -> Result<String> {
        if !self.interactive {
            return NonInteractive.input(question);
        }
        let answer: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }
}
