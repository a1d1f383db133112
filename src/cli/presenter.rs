//! Terminal output for the CLI
//!
//! Status lines and the permission spinner go to stderr. Command results go
//! to stdout so they can be piped.

use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TICK: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy)]
enum Mark {
    Info,
    Success,
    Warn,
    Error,
}

impl Mark {
    fn symbol(self) -> ColoredString {
        match self {
            Mark::Info => "ℹ".cyan(),
            Mark::Success => "✓".green(),
            Mark::Warn => "⚠".yellow(),
            Mark::Error => "✗".red(),
        }
    }

    fn line(self, message: &str) -> String {
        format!("{} {}", self.symbol(), message)
    }
}

/// Writes user-facing output; logs go through `tracing` instead
#[derive(Default)]
pub struct Presenter {
    /// Shown while a permission prompt is open
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a spinner until `spinner_success` or `spinner_fail`
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(SPINNER_TICK);
        self.spinner = Some(spinner);
    }

    pub fn spinner_success(&mut self, message: &str) {
        self.finish_spinner(Mark::Success, message);
    }

    pub fn spinner_fail(&mut self, message: &str) {
        self.finish_spinner(Mark::Error, message);
    }

    fn finish_spinner(&mut self, mark: Mark, message: &str) {
        match self.spinner.take() {
            Some(spinner) => spinner.finish_with_message(mark.line(message)),
            None => eprintln!("{}", mark.line(message)),
        }
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", Mark::Info.line(message));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", Mark::Success.line(message));
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{}", Mark::Warn.line(message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", Mark::Error.line(message));
    }

    /// Command result on stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// `key: value` result line on stdout
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_pair_symbol_and_message() {
        colored::control::set_override(false);
        assert_eq!(Mark::Success.line("Notification 3 shown"), "✓ Notification 3 shown");
        assert_eq!(Mark::Error.line("Cancelled"), "✗ Cancelled");
        assert_eq!(Mark::Warn.line("x"), "⚠ x");
        assert_eq!(Mark::Info.line("x"), "ℹ x");
    }

    #[test]
    fn spinner_is_cleared_when_finished() {
        let mut presenter = Presenter::new();
        presenter.start_spinner("Waiting for permission...");
        assert!(presenter.spinner.is_some());

        presenter.spinner_success("Permission granted");
        assert!(presenter.spinner.is_none());
    }

    #[test]
    fn finishing_without_spinner_still_reports() {
        let mut presenter = Presenter::new();
        presenter.spinner_fail("Cancelled");
        assert!(presenter.spinner.is_none());
    }
}
