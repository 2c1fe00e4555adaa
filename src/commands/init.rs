//! Command: register a new config.
use std::path::Path;

use anyhow::Result;

use crate::fs;
use crate::logging::Log;
use crate::registry::Registry;

/// Create config `name` writing to `outfile`.
///
/// # Errors
///
/// Returns an error if a config called `name` already exists.
pub fn run(registry: &mut Registry, name: &str, outfile: &Path, log: &dyn Log) -> Result<()> {
    let outfile = fs::resolve_cli_path(outfile);
    log.info(&format!("creating {name}, output {}", outfile.display()));
    registry.init(name, outfile)?;
    Ok(())
}
