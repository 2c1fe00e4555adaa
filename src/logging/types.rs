//! Per-config reports and the [`Log`] trait.
use std::path::Path;

/// Result of reconfiguring one config, as shown in the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigReport {
    /// Config name.
    pub config: String,
    /// What happened to the outfile.
    pub status: ReportStatus,
    /// Outfile path, skip reason or error text.
    pub detail: Option<String>,
}

/// What happened to a config's outfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// Outfile overwritten.
    Written,
    /// Nothing written: active set missing, no input read, or no outfile.
    Skipped,
    /// Dry run; the outfile would have been written.
    DryRun,
    /// The config could not be reconfigured.
    Failed,
}

impl ReportStatus {
    /// Summary glyph.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Written => "✓",
            Self::Skipped => "○",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }

    /// ANSI color used for the summary line.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Written => "\x1b[32m",
            Self::Skipped => "\x1b[33m",
            Self::DryRun => "\x1b[37m",
            Self::Failed => "\x1b[31m",
        }
    }

    /// Word used in the totals line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the console/file implementation used
/// by the binary. Library code takes `&dyn Log` so tests can substitute a
/// recording implementation.
pub trait Log: Send + Sync {
    /// Log a stage header.
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (hidden on the console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning.
    fn warn(&self, msg: &str);
    /// Log an error.
    fn error(&self, msg: &str);
    /// Log what a dry run would have done.
    fn dry_run(&self, msg: &str);
    /// Log a file being read or written, e.g. `file("concatenating", path)`.
    fn file(&self, action: &str, path: &Path);
    /// Record the result of one config for the summary.
    fn report(&self, config: &str, status: ReportStatus, detail: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_a_distinct_icon() {
        let all = [
            ReportStatus::Written,
            ReportStatus::Skipped,
            ReportStatus::DryRun,
            ReportStatus::Failed,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(a.icon(), b.icon());
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn failed_is_red() {
        assert_eq!(ReportStatus::Failed.color(), "\x1b[31m");
        assert_eq!(ReportStatus::Failed.label(), "failed");
    }
}
