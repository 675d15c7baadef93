//! Progress reporting

use crate::executor::{ExecutionEvent, ExecutionStats};
use console::style;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::path::Path;

/// Terminal reporter for a sync run
///
/// Shows a spinner with the file being copied while attached to a terminal.
/// With `verbose`, every copied pair is also printed to stdout.
pub struct ProgressReporter {
    bar: ProgressBar,
    verbose: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(verbose: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        if let Ok(bar_style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(bar_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self { bar, verbose }
    }

    /// Feed one executor event
    pub fn handle(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::CopyStart { from, to } => {
                self.bar.set_message(format!("Copying {}", from.display()));
                if self.verbose {
                    self.bar.suspend(|| println!("{}", format_copy_line(from, to)));
                }
            }
            ExecutionEvent::Complete { stats } => {
                self.bar.finish_and_clear();
                println!("{}", format_summary(stats));
            }
            ExecutionEvent::Copied { .. }
            | ExecutionEvent::Skipped { .. }
            | ExecutionEvent::SizeMismatch(_) => {}
        }
    }

    /// Drop the spinner without a summary (used when the run fails)
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

/// `source -> destination`
pub fn format_copy_line(from: &Path, to: &Path) -> String {
    format!("{} {} {}", from.display(), style("->").dim(), to.display())
}

/// One-line end-of-run summary
pub fn format_summary(stats: &ExecutionStats) -> String {
    let mut line = format!(
        "Synced: {} copied, {} skipped | {}",
        stats.files_copied,
        stats.files_skipped,
        HumanBytes(stats.bytes_copied)
    );
    if !stats.size_mismatches.is_empty() {
        line.push_str(&format!(
            " | {} size warning(s)",
            stats.size_mismatches.len()
        ));
    }
    line
}
