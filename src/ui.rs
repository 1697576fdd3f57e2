// UI module for terminal output
//
// Machine-readable output goes to stdout; spinners and status lines go to
// stderr so `hatchery resolve ... > egg.json` stays clean.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner style similar to uv/pnpm
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Check if stderr is a TTY (for interactive output)
fn is_tty() -> bool {
    Term::stderr().is_term()
}

fn message_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Create a styled spinner for async operations
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if !is_tty() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars(SPINNER_CHARS)
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(spinner_style);
    pb.set_message(message.to_string());

    if is_tty() {
        pb.enable_steady_tick(Duration::from_millis(80));
    }

    pb
}

/// Finish a spinner with the resolved modpack
pub fn finish_spinner_resolved(pb: &ProgressBar, name: &str, detail: &str) {
    finish_spinner(pb, format!("{} {} {}", style("✓").green(), name, style(detail).dim()));
}

/// Finish a spinner for a best-effort resolution
pub fn finish_spinner_degraded(pb: &ProgressBar, name: &str, reason: &str) {
    finish_spinner(pb, format!("{} {} {}", style("⚠").yellow(), name, style(reason).dim()));
}

fn finish_spinner(pb: &ProgressBar, msg: String) {
    if is_tty() {
        pb.set_style(message_style());
        pb.finish_with_message(msg);
    } else {
        pb.finish_and_clear();
        eprintln!("{}", msg);
    }
}

/// Print a success message with checkmark
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Write command output to stdout
pub fn emit(text: &str) {
    println!("{}", text);
}
