//! Command: add an input to a set.
use anyhow::Result;

use crate::cli::InputOpts;
use crate::logging::Log;
use crate::registry::Registry;

/// Append the input to the chosen set of the named config.
///
/// An unknown config name is reported and otherwise ignored.
///
/// # Errors
///
/// Returns an error if the input path is not valid UTF-8.
pub fn run(registry: &mut Registry, opts: &InputOpts, log: &dyn Log) -> Result<()> {
    let input = super::input_string(&opts.infile)?;
    let Some(config) = super::lookup(registry, &opts.name, log) else {
        return Ok(());
    };

    let set = opts.set.as_deref().unwrap_or(config.active_set()).to_string();
    log.info(&format!("adding {input} to {}/{set}", opts.name));
    config.add_input(&input, Some(&set));
    Ok(())
}
