//! Log file location, ANSI stripping and timestamps.
use std::path::PathBuf;

/// `strftime` format of the run header.
pub(super) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// `strftime` format of each log line.
pub(super) const TIME_FORMAT: &str = "%H:%M:%S";

/// Remove ANSI CSI sequences (colors, cursor movement) from `s`.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            let _ = chars.by_ref().find(|inner| ('@'..='~').contains(inner));
        }
    }
    out
}

/// Directory for log files: `$XDG_CACHE_HOME/rtk`, else `~/.cache/rtk`.
fn log_dir_from(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());
    non_empty("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            non_empty("HOME")
                .or_else(|| non_empty("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(".cache"))
        })
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("rtk")
}

/// Log file for `command`, creating its directory if needed.
///
/// Each command writes its own file (`reconfigure.log`, `add.log`, ...),
/// replaced on every run.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = log_dir_from(|key| std::env::var(key).ok());
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time in `format`.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}
