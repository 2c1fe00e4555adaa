//! Top-level action orchestration: load the registry, run one action, save.
pub mod add;
pub mod delete;
pub mod init;
pub mod list;
pub mod reconfigure;
pub mod set;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::Config;
use crate::fs;
use crate::logging::{Log, Logger};
use crate::registry::Registry;

/// Run the action selected on the command line.
///
/// The registry is saved after every action that completes, including the
/// read-only ones, so the document is always left in normalized form.
///
/// # Errors
///
/// Returns an error if the registry cannot be located, loaded or saved, or
/// if the action fails. A failed action leaves the registry file untouched.
pub fn run(cli: &Cli, log: &Logger) -> Result<()> {
    if matches!(cli.command, Command::Version) {
        version::run();
        return Ok(());
    }

    let path = resolve_registry_path(&cli.global)?;
    log.debug(&format!("registry: {}", path.display()));
    let mut registry = Registry::load(&path).context("cannot load registry")?;

    match &cli.command {
        Command::List { name } => list::run(&registry, name.as_deref(), log),
        Command::Reconfigure => reconfigure::run(&registry, &cli.global, log)?,
        Command::Init { name, outfile } => init::run(&mut registry, name, outfile, log)?,
        Command::Add(opts) => add::run(&mut registry, opts, log)?,
        Command::Set { name, set } => set::run(&mut registry, name, set.as_deref(), log),
        Command::Delete(opts) => delete::run(&mut registry, opts, log)?,
        Command::Version => {}
    }

    registry.save().context("cannot save registry")?;
    log.debug(&format!("saved {}", registry.path().display()));
    Ok(())
}

/// Determine the registry file.
///
/// # Errors
///
/// Returns an error if no location is given and no home directory is known.
pub fn resolve_registry_path(global: &GlobalOpts) -> Result<PathBuf> {
    registry_path_from(global.config.as_deref(), |key| std::env::var(key).ok())
}

/// Precedence: explicit path, `RTK_CONFIG`, `$XDG_CONFIG_HOME/rtk/config.yaml`,
/// `$HOME/.config/rtk/config.yaml`.
fn registry_path_from(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(fs::absolutize(path));
    }

    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(path) = non_empty("RTK_CONFIG") {
        return Ok(fs::absolutize(Path::new(&path)));
    }
    if let Some(dir) = non_empty("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(dir).join("rtk").join("config.yaml"));
    }
    if let Some(home) = non_empty("HOME").or_else(|| non_empty("USERPROFILE")) {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join("rtk")
            .join("config.yaml"));
    }

    anyhow::bail!("cannot determine registry location. Use --config or set RTK_CONFIG")
}

/// Look up `name` for mutation, reporting the known names if it is missing.
fn lookup<'a>(registry: &'a mut Registry, name: &str, log: &dyn Log) -> Option<&'a mut Config> {
    if registry.get(name).is_none() {
        report_unknown(registry, name, log);
        return None;
    }
    registry.get_mut(name)
}

fn report_unknown(registry: &Registry, name: &str, log: &dyn Log) {
    log.warn(&format!("config {name} not found"));
    let names: Vec<&str> = registry.names().collect();
    if names.is_empty() {
        log.info("no configs registered yet, create one with `rtk init`");
    } else {
        log.info(&format!("available configs: {}", names.join(", ")));
    }
}

/// Resolve a path argument into the string stored in a file set.
fn input_string(path: &Path) -> Result<String> {
    let resolved = fs::resolve_cli_path(path);
    resolved
        .to_str()
        .map(str::to_string)
        .with_context(|| format!("path is not valid UTF-8: {}", resolved.display()))
}
