//! Command: rebuild every output file.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::registry::Registry;

/// Reconfigure all configs, print the summary, and fail if any config failed.
///
/// # Errors
///
/// Returns an error if one or more configs recorded a failure.
pub fn run(registry: &Registry, global: &GlobalOpts, log: &Logger) -> Result<()> {
    if global.dry_run {
        log.info("dry run, no output files will be written");
    }

    let count = registry.reconfigure_all(log, global.dry_run);
    log.print_summary();

    if count > 0 {
        anyhow::bail!("{count} config(s) failed");
    }
    Ok(())
}
