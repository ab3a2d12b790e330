use std::io::{self, BufRead, Write};

use crate::board::effects::Confirm;

/// Confirmation policy for one CLI invocation. `--yes` answers yes to
/// everything; otherwise JSON mode is non-interactive and answers no, and
/// text mode asks on stderr/stdin.
pub struct CliConfirm {
    assume_yes: bool,
    interactive: bool,
}

impl CliConfirm {
    pub fn new(json_output: bool, assume_yes: bool) -> Self {
        Self {
            assume_yes,
            interactive: !json_output,
        }
    }
}

impl Confirm for CliConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !self.interactive {
            return false;
        }
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes" | "YES")
    }
}
