//! Console output for the end of a run.

use crate::domain::BumpDecision;
use crate::git::PushOutcome;
use crate::skip::SkipReason;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display the old and new tag of a bump decision.
pub fn display_decision(decision: &BumpDecision) {
    println!("\n\x1b[1mVersion Decision ({} bump):\x1b[0m", decision.kind);
    println!("  Old Tag: \x1b[31m{}\x1b[0m", decision.old_version);
    println!("  New Tag: \x1b[32m{}\x1b[0m", decision.new_version);
}

/// Display why publishing stopped early.
pub fn display_skip(reason: &SkipReason) {
    display_status(&reason.to_string());
}

/// Display the result of pushing `tag` to `remote`.
pub fn display_push(tag: &str, remote: &str, outcome: PushOutcome) {
    match outcome {
        PushOutcome::Pushed => display_success(&format!("Pushed tag {} to {}", tag, remote)),
        PushOutcome::AlreadyUpToDate => display_status(&format!(
            "Remote {} was up to date, tag {} not pushed",
            remote, tag
        )),
    }
}
