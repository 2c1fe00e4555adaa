//! The [`Log`] implementation used by the binary.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, FILE_TARGET, STAGE_TARGET};
use super::types::{ConfigReport, Log, ReportStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Emits through [`tracing`] and collects per-config reports for the run
/// summary.
///
/// Where messages land is decided by the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber). Without one (as
/// in tests) messages are dropped but reports are still collected.
#[derive(Debug)]
pub struct Logger {
    reports: Mutex<Vec<ConfigReport>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`, remembering its log file for the
    /// summary.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log what a dry run would have done.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Log a file being read or written.
    pub fn file(&self, action: &str, path: &Path) {
        tracing::info!(target: FILE_TARGET, path = %path.display(), "{action}");
    }

    /// Record the result of one config.
    pub fn report(&self, config: &str, status: ReportStatus, detail: Option<&str>) {
        if let Ok(mut guard) = self.reports.lock() {
            guard.push(ConfigReport {
                config: config.to_string(),
                status,
                detail: detail.map(String::from),
            });
        }
    }

    /// Every report, in recording order.
    #[must_use]
    pub fn reports(&self) -> Vec<ConfigReport> {
        self.reports.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Number of configs reported as [`ReportStatus::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(ReportStatus::Failed)
    }

    fn count(&self, status: ReportStatus) -> usize {
        self.reports
            .lock()
            .map_or(0, |g| g.iter().filter(|r| r.status == status).count())
    }

    /// Print one line per reported config and the totals.
    pub fn print_summary(&self) {
        let reports = self.reports();
        if reports.is_empty() {
            return;
        }

        self.stage("Summary");
        for report in &reports {
            let status = report.status;
            let detail = report
                .detail
                .as_ref()
                .map_or_else(String::new, |d| format!(" ({d})"));
            self.info(&format!(
                "{}{} {}{detail}\x1b[0m",
                status.color(),
                status.icon(),
                report.config
            ));
        }

        let totals: Vec<String> = [
            ReportStatus::Written,
            ReportStatus::Skipped,
            ReportStatus::DryRun,
            ReportStatus::Failed,
        ]
        .into_iter()
        .map(|status| {
            format!(
                "{}{} {}\x1b[0m",
                status.color(),
                self.count(status),
                status.label()
            )
        })
        .collect();
        self.info(&format!("{} configs: {}", reports.len(), totals.join(", ")));

        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn file(&self, action: &str, path: &Path) {
        self.file(action, path);
    }

    fn report(&self, config: &str, status: ReportStatus, detail: Option<&str>) {
        self.report(config, status, detail);
    }
}
