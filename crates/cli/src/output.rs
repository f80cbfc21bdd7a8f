//! Terminal output utilities
//!
//! Status lines go to stdout, warnings and errors to stderr.

use owo_colors::OwoColorize;
use std::time::Duration;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print an indented key/value line
    pub fn detail(key: &str, value: &str) {
        println!("  {} {}", format!("{key}:").dimmed(), value);
    }
}

/// Tally of a batch of render jobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files written
    pub written: usize,
    /// Renders that could not meet the size limit
    pub over_budget: usize,
    /// Jobs that failed with an error
    pub failed: usize,
    /// Total bytes written
    pub bytes: u64,
}

impl RunSummary {
    /// Record a written file
    pub fn record_written(&mut self, size: u64) {
        self.written += 1;
        self.bytes += size;
    }

    /// Record a render that did not fit the size limit
    pub fn record_over_budget(&mut self) {
        self.over_budget += 1;
    }

    /// Record a failed job
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Whether every job produced a file
    pub fn is_clean(&self) -> bool {
        self.over_budget == 0 && self.failed == 0
    }

    /// One-line description, e.g. `3 images written (4.20 MB), 1 failed`
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{} written ({})",
            format_count(self.written, "image", "images"),
            format_size(self.bytes)
        );
        if self.over_budget > 0 {
            line.push_str(&format!(", {} over the size limit", self.over_budget));
        }
        if self.failed > 0 {
            line.push_str(&format!(", {} failed", self.failed));
        }
        line
    }

    /// Print the summary with a status matching the outcome
    pub fn print(&self, elapsed: Duration) {
        let line = format!("{} in {}", self.describe(), format_duration(elapsed));
        if self.is_clean() {
            Status::success(&line);
        } else {
            Status::warning(&line);
        }
    }
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs_f32(5.5)), "5.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(19 * 1024 * 1024), "19.00 MB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "image", "images"), "1 image");
        assert_eq!(format_count(0, "image", "images"), "0 images");
    }

    #[test]
    fn test_run_summary() {
        let mut summary = RunSummary::default();
        summary.record_written(1024 * 1024);
        summary.record_written(1024 * 1024);
        assert!(summary.is_clean());
        assert_eq!(summary.describe(), "2 images written (2.00 MB)");

        summary.record_over_budget();
        summary.record_failure();
        assert!(!summary.is_clean());
        assert_eq!(
            summary.describe(),
            "2 images written (2.00 MB), 1 over the size limit, 1 failed"
        );
    }
}
