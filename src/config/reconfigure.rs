//! The reconfiguration pipeline: resolve the active set, concatenate its
//! inputs, substitute placeholders, and write the outfile.
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::{Config, glob, template};
use crate::error::ConfigError;
use crate::fs;
use crate::logging::Log;

/// What [`Config::reconfigure`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The outfile was overwritten.
    Written(PathBuf),
    /// Dry run: the outfile would have been overwritten.
    DryRun(PathBuf),
    /// Output was produced but the config has no outfile.
    NoOutfile,
    /// The active set does not exist; nothing was read.
    SetNotFound(String),
    /// No input produced any text; the outfile was left alone.
    Empty,
}

/// A work-queue entry. Glob matches are never expanded a second time.
#[derive(Debug)]
enum Input {
    Listed(PathBuf),
    Matched(PathBuf),
}

/// Read every input in queue order into one buffer.
///
/// Inputs that do not exist are expanded as globs and their matches are
/// appended to the tail of the queue, so all literal files of the set are
/// read before any glob match.
fn concatenate(inputs: &[String], log: &dyn Log) -> Result<String, ConfigError> {
    let mut queue: VecDeque<Input> = inputs
        .iter()
        .map(|input| Input::Listed(fs::absolutize(Path::new(input))))
        .collect();
    let mut buffer = String::new();

    while let Some(input) = queue.pop_front() {
        let (path, listed) = match input {
            Input::Listed(path) => (path, true),
            Input::Matched(path) => (path, false),
        };

        if path.is_file() {
            log.file("concatenating", &path);
            let text = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read { path, source })?;
            buffer.push_str(&text);
        } else if path.exists() {
            log.warn(&format!("skipping {}, not a regular file", path.display()));
        } else if listed {
            let matches = glob::expand(&path);
            if matches.is_empty() {
                log.debug(&format!("no files match {}", path.display()));
            }
            queue.extend(matches.into_iter().map(Input::Matched));
        } else {
            log.warn(&format!("{} disappeared, skipping", path.display()));
        }
    }

    Ok(buffer)
}

impl Config {
    /// Rebuild this config's outfile from its active set.
    ///
    /// A missing active set or an empty result is not an error: the outfile
    /// is left untouched and the reason is reported through `log` and the
    /// returned [`Outcome`]. With `dry_run` nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read, the substitution source
    /// cannot be loaded, or the outfile cannot be written.
    pub fn reconfigure(&self, log: &dyn Log, dry_run: bool) -> Result<Outcome, ConfigError> {
        let Some(inputs) = self.active_inputs() else {
            log.warn(&format!(
                "ignoring {}, set {} not found",
                self.name, self.active_set
            ));
            return Ok(Outcome::SetNotFound(self.active_set.clone()));
        };

        let mut buffer = concatenate(inputs, log)?;

        if self.substitution_enabled() {
            let source = self.globals.substitution_source()?;
            log.debug(&format!("substituting from {}", source.display()));
            let vars = template::load_vars(&source)?;
            buffer = template::substitute(&buffer, &vars);
        }

        if buffer.is_empty() {
            log.warn(&format!(
                "ignoring {}, no input files read (files not found?)",
                self.name
            ));
            return Ok(Outcome::Empty);
        }

        let Some(outfile) = self.outfile() else {
            log.debug(&format!("{} has no outfile, nothing to write", self.name));
            return Ok(Outcome::NoOutfile);
        };

        if dry_run {
            log.dry_run(&format!(
                "would write {} bytes to {}",
                buffer.len(),
                outfile.display()
            ));
            return Ok(Outcome::DryRun(outfile.to_path_buf()));
        }

        log.file("saving to", outfile);
        fs::write_file(outfile, &buffer).map_err(|source| ConfigError::Write {
            path: outfile.to_path_buf(),
            source,
        })?;
        Ok(Outcome::Written(outfile.to_path_buf()))
    }
}
