//! Command: remove an input from a set.
use anyhow::Result;

use crate::cli::InputOpts;
use crate::logging::Log;
use crate::registry::Registry;

/// Remove the first occurrence of the input from the chosen set.
///
/// An unknown config name, or an input not in the set, is reported and
/// otherwise ignored.
///
/// # Errors
///
/// Returns an error if the set does not exist or the input path is not
/// valid UTF-8.
pub fn run(registry: &mut Registry, opts: &InputOpts, log: &dyn Log) -> Result<()> {
    let input = super::input_string(&opts.infile)?;
    let Some(config) = super::lookup(registry, &opts.name, log) else {
        return Ok(());
    };

    if config.remove_input(&input, opts.set.as_deref(), log)? {
        log.info(&format!("removed {input} from {}", opts.name));
    }
    Ok(())
}
