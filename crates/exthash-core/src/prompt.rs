//! Operator prompts as an injected capability.
//!
//! The terminal implementation lives in the CLI; library code only sees the trait,
//! so registry updates can be driven deterministically in tests.

use anyhow::Result;

pub trait Prompter {
    /// Yes/no question, default no.
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Free-text question. Answers come back trimmed; empty means "no answer".
    fn input(&self, question: &str) -> Result<String>;
}

/// Answers every question negatively/empty. Used when stdin is not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn confirm(&self, question: &str) -> Result<bool> {
        tracing::debug!("non-interactive, answering no to {:?}", question);
        Ok(false)
    }

    fn input(&self, question: &str) -> Result<String> {
        tracing::debug!("non-interactive, empty answer to {:?}", question);
        Ok(String::new())
    }
}
