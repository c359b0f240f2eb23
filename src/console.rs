//! Operator confirmation capability.
//!
//! Modeled as a trait so non-interactive contexts (tests, `--yes`) can inject
//! an always-yes policy without changing orchestrator logic.

use std::io::{BufRead, Write};

/// Yes/no prompt abstraction.
pub trait Confirmer {
    /// Ask the operator a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes to everything. For `--yes` runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysYes;

impl Confirmer for AlwaysYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Interactive confirmation over stdin/stdout.
///
/// Accepts `y`/`yes` (case-insensitive); anything else is a no.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        let mut out = std::io::stdout().lock();
        if write!(out, "{prompt} (y/n): ").and_then(|_| out.flush()).is_err() {
            return false;
        }
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
