//! Tracing subscriber: console formatting, the per-command log file, and
//! tagging of events with the config being reconfigured.
//!
//! [`Registry::reconfigure_all`](crate::registry::Registry::reconfigure_all)
//! runs each config inside a `config` span carrying a `config` field. The
//! log file prefixes every event inside such a span with `[name]`, so the
//! lines of one config can be grepped out of a long run.
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use std::sync::Mutex;

use tracing::span;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use super::utils::{DATETIME_FORMAT, TIME_FORMAT, log_file_path, strip_ansi, utc_now};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "rtk::stage";
/// Target used for dry-run messages.
pub(super) const DRY_RUN_TARGET: &str = "rtk::dry_run";
/// Target used for input reads and outfile writes.
pub(super) const FILE_TARGET: &str = "rtk::file";

/// How an event is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    File,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => Self::Error,
            (tracing::Level::WARN, _) => Self::Warn,
            (tracing::Level::INFO, STAGE_TARGET) => Self::Stage,
            (tracing::Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (tracing::Level::INFO, FILE_TARGET) => Self::File,
            (tracing::Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// The fields rtk puts on its events and spans.
#[derive(Debug, Default)]
struct Fields {
    message: String,
    path: Option<String>,
    config: Option<String>,
}

impl Fields {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "path" => self.path = Some(value),
            "config" => self.config = Some(value),
            _ => {}
        }
    }
}

impl tracing::field::Visit for Fields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.set(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.set(field.name(), value.to_string());
    }
}

/// Console rendering of one event.
fn console_line(kind: Kind, fields: &Fields) -> String {
    let msg = &fields.message;
    match (kind, &fields.path) {
        (Kind::Error, _) => format!("\x1b[31mERROR\x1b[0m {msg}"),
        (Kind::Warn, _) => format!("\x1b[33mWARN\x1b[0m  {msg}"),
        (Kind::Stage, _) => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
        (Kind::DryRun, _) => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
        (Kind::File, Some(path)) => format!("  {msg} \x1b[36m{path}\x1b[0m"),
        (Kind::File | Kind::Info, _) => format!("  {msg}"),
        (Kind::Debug, _) => format!("  \x1b[2m{msg}\x1b[0m"),
    }
}

/// Log file rendering of one event, stamped with `time` and tagged with
/// the enclosing config, if any.
fn file_line(kind: Kind, fields: &Fields, config: Option<&str>, time: &str) -> String {
    let msg = strip_ansi(&fields.message);
    if kind == Kind::Stage {
        return format!("[{time}] ==> {msg}");
    }
    let tag = config.map_or_else(String::new, |name| format!("[{name}] "));
    let body = match (kind, &fields.path) {
        (Kind::DryRun, _) => format!("[dry run] {msg}"),
        (Kind::Error, _) => format!("[error] {msg}"),
        (Kind::Warn, _) => format!("[warn] {msg}"),
        (Kind::Debug, _) => format!("[debug] {msg}"),
        (Kind::File, Some(path)) => format!("{msg} {path}"),
        _ => msg,
    };
    format!("[{time}]     {tag}{body}")
}

/// First line block of every log file.
fn run_header(command: &str, dry_run: bool, started: &str) -> String {
    let version =
        option_env!("RTK_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
    let mode = if dry_run { " (dry run)" } else { "" };
    format!(
        "==========================================\n\
         rtk {version} {command}{mode} {started}\n\
         ==========================================\n"
    )
}

/// Name of the config a span belongs to, kept in the span's extensions.
#[derive(Debug)]
struct ConfigName(String);

/// Records the `config` field of new spans so layers can tag events.
#[derive(Debug)]
pub(super) struct ConfigSpanLayer;

impl<S> tracing_subscriber::Layer<S> for ConfigSpanLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        attrs.record(&mut fields);
        if let (Some(name), Some(span)) = (fields.config, ctx.span(id)) {
            span.extensions_mut().insert(ConfigName(name));
        }
    }
}

/// Innermost config enclosing `event`.
fn current_config<S>(event: &tracing::Event<'_>, ctx: &Context<'_, S>) -> Option<String>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    ctx.event_scope(event)?
        .find_map(|span| span.extensions().get::<ConfigName>().map(|c| c.0.clone()))
}

/// Appends every event to the command's log file, with timestamps, config
/// tags and without ANSI codes.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the log file for `command` in the cache directory.
    ///
    /// Returns `None` if the directory or the file cannot be created; the
    /// run then logs to the console only.
    pub(super) fn new(command: &str, dry_run: bool) -> Option<Self> {
        let path = log_file_path(command)?;
        Self::create(&path, command, dry_run).ok()
    }

    /// Truncate `path`, write the run header, and open it for appending.
    fn create(path: &Path, command: &str, dry_run: bool) -> io::Result<Self> {
        fs::write(path, run_header(command, dry_run, &utc_now(DATETIME_FORMAT)))?;
        let file = fs::OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S> tracing_subscriber::Layer<S> for FileLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let config = current_config(event, &ctx);
        let line = file_line(
            Kind::of(event.metadata()),
            &fields,
            config.as_deref(),
            &utc_now(TIME_FORMAT),
        );

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console output: warnings and errors go to stderr, the rest to stdout.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut fields = Fields::default();
        event.record(&mut fields);
        writeln!(writer, "{}", console_line(Kind::of(event.metadata()), &fields))
    }
}

/// Install the global subscriber.
///
/// The console shows `info` and above (`debug` too when `verbose`). The
/// log file `$XDG_CACHE_HOME/rtk/<command>.log` always receives `debug` and
/// above. Must be called once, before any logging.
pub fn init_subscriber(verbose: bool, dry_run: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command, dry_run).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(ConfigSpanLayer)
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;
    use crate::logging::Logger;

    fn fields(message: &str, path: Option<&str>) -> Fields {
        Fields {
            message: message.to_string(),
            path: path.map(String::from),
            config: None,
        }
    }

    #[test]
    fn console_highlights_file_paths() {
        let line = console_line(Kind::File, &fields("concatenating", Some("/dots/a.conf")));
        assert_eq!(line, "  concatenating \x1b[36m/dots/a.conf\x1b[0m");
    }

    #[test]
    fn console_marks_dry_run_and_warnings() {
        assert!(console_line(Kind::DryRun, &fields("would write", None)).contains("[DRY RUN]"));
        assert!(console_line(Kind::Warn, &fields("skipping", None)).starts_with("\x1b[33mWARN"));
    }

    #[test]
    fn file_lines_carry_time_and_config_tag() {
        let line = file_line(
            Kind::File,
            &fields("saving to", Some("/home/me/.zshrc")),
            Some("zsh"),
            "12:00:00",
        );
        assert_eq!(line, "[12:00:00]     [zsh] saving to /home/me/.zshrc");
        let line = file_line(Kind::Warn, &fields("\x1b[1mgone\x1b[0m", None), None, "t");
        assert_eq!(line, "[t]     [warn] gone");
    }

    #[test]
    fn stage_lines_are_never_tagged() {
        let line = file_line(Kind::Stage, &fields("Reconfiguring i3", None), Some("i3"), "t");
        assert_eq!(line, "[t] ==> Reconfiguring i3");
    }

    #[test]
    fn run_header_names_command_and_mode() {
        let header = run_header("reconfigure", true, "2024-01-01 00:00:00");
        assert!(header.contains(" reconfigure (dry run) 2024-01-01 00:00:00\n"));
        assert!(!run_header("list", false, "x").contains("dry run"));
    }

    #[test]
    fn log_file_records_config_scoped_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reconfigure.log");
        let layer = FileLayer::create(&path, "reconfigure", false).unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(ConfigSpanLayer)
            .with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let log = Logger::new("test");
            log.stage("Reconfiguring i3");
            {
                let _span = tracing::info_span!("config", config = "i3").entered();
                log.file("concatenating", Path::new("/dots/i3/base.conf"));
                log.dry_run("would write 3 bytes to /home/me/.i3/config");
            }
            log.info("\x1b[32m✓ i3\x1b[0m");
        });

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("rtk "));
        assert!(lines[1].contains(" reconfigure "));
        assert!(lines[3].ends_with("==> Reconfiguring i3"));
        assert!(lines[4].ends_with("[i3] concatenating /dots/i3/base.conf"));
        assert!(lines[5].ends_with("[i3] [dry run] would write 3 bytes to /home/me/.i3/config"));
        assert!(lines[6].ends_with("     ✓ i3"));
    }
}
