//! A single named configuration: its file sets, active set, and outfile.
//!
//! Reconfiguration (resolve, concatenate, substitute, write) lives in
//! [`reconfigure`]; glob expansion and template substitution are in
//! [`glob`] and [`template`].
pub mod glob;
pub mod options;
pub mod reconfigure;
pub mod template;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::Log;

pub use options::{GlobalOptions, SubstitutionOptions};
pub use reconfigure::Outcome;

/// Name given to the active set of a freshly initialised config.
pub const DEFAULT_SET: &str = "default";

fn default_set_name() -> String {
    DEFAULT_SET.to_string()
}

/// The inputs of one file set as they appear in the registry document:
/// `null`, a bare path string, or a list of paths/globs.
///
/// The original shape is kept so an unmodified set round-trips unchanged;
/// any mutation normalizes it to [`FileSet::List`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileSet {
    /// `null` in the document.
    #[default]
    Empty,
    /// A single path or glob.
    Single(String),
    /// An ordered list of paths or globs.
    List(Vec<String>),
}

impl FileSet {
    /// The inputs in concatenation order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Empty => &[],
            Self::Single(path) => std::slice::from_ref(path),
            Self::List(paths) => paths,
        }
    }

    /// Append `path`, converting the set to a list.
    pub fn push(&mut self, path: String) {
        if let Self::List(paths) = self {
            paths.push(path);
            return;
        }
        let mut paths = self.paths().to_vec();
        paths.push(path);
        *self = Self::List(paths);
    }

    /// Remove the first occurrence of `path`. Returns `false` if absent.
    pub fn remove_first(&mut self, path: &str) -> bool {
        let Some(index) = self.paths().iter().position(|p| p == path) else {
            return false;
        };
        let mut paths = self.paths().to_vec();
        paths.remove(index);
        *self = Self::List(paths);
        true
    }
}

/// One entry of the `configs` list in the registry document.
///
/// Keys other than the four known ones are per-config options and are kept
/// verbatim in [`options`](Self::options).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Unique config name.
    pub name: String,
    /// File sets keyed by set name; `null` when the config has none yet.
    #[serde(default)]
    pub infiles: Option<BTreeMap<String, FileSet>>,
    /// Destination file; `null` or empty disables writing.
    #[serde(default)]
    pub outfile: Option<PathBuf>,
    /// Currently selected set.
    #[serde(default = "default_set_name")]
    pub active_set: String,
    /// Per-config overrides (e.g. `substitute: true`).
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

/// A named logical configuration.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    file_sets: Option<BTreeMap<String, FileSet>>,
    active_set: String,
    outfile: Option<PathBuf>,
    options: BTreeMap<String, serde_yaml::Value>,
    globals: Arc<GlobalOptions>,
}

impl Config {
    /// Build a config from its document entry.
    #[must_use]
    pub fn from_entry(entry: ConfigEntry, globals: Arc<GlobalOptions>) -> Self {
        Self {
            name: entry.name,
            file_sets: entry.infiles,
            active_set: entry.active_set,
            outfile: entry.outfile,
            options: entry.options,
            globals,
        }
    }

    /// A new config with no file sets and the [`DEFAULT_SET`] active.
    #[must_use]
    pub fn new(name: &str, outfile: PathBuf, globals: Arc<GlobalOptions>) -> Self {
        Self {
            name: name.to_string(),
            file_sets: None,
            active_set: default_set_name(),
            outfile: Some(outfile),
            options: BTreeMap::new(),
            globals,
        }
    }

    /// Project the persistable fields back into a document entry.
    #[must_use]
    pub fn export(&self) -> ConfigEntry {
        ConfigEntry {
            name: self.name.clone(),
            infiles: self.file_sets.clone(),
            outfile: self.outfile.clone(),
            active_set: self.active_set.clone(),
            options: self.options.clone(),
        }
    }

    /// Config name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the active set. It may not exist in [`sets`](Self::sets) yet.
    #[must_use]
    pub fn active_set(&self) -> &str {
        &self.active_set
    }

    /// Destination file, or `None` when writing is disabled.
    #[must_use]
    pub fn outfile(&self) -> Option<&Path> {
        self.outfile
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Per-config option overrides.
    #[must_use]
    pub const fn options(&self) -> &BTreeMap<String, serde_yaml::Value> {
        &self.options
    }

    /// Shared global options.
    #[must_use]
    pub const fn globals(&self) -> &Arc<GlobalOptions> {
        &self.globals
    }

    /// All file sets in name order.
    pub fn sets(&self) -> impl Iterator<Item = (&str, &FileSet)> {
        self.file_sets
            .iter()
            .flat_map(|sets| sets.iter().map(|(name, set)| (name.as_str(), set)))
    }

    /// Whether `set` exists as a key (an empty set still counts).
    #[must_use]
    pub fn has_set(&self, set: &str) -> bool {
        self.file_sets
            .as_ref()
            .is_some_and(|sets| sets.contains_key(set))
    }

    /// Whether the output should go through template substitution.
    #[must_use]
    pub fn substitution_enabled(&self) -> bool {
        self.globals.substitution.default
            || self
                .options
                .get("substitute")
                .and_then(serde_yaml::Value::as_bool)
                .unwrap_or(false)
    }

    /// Append `path` to `set` (the active set when `None`), creating the set
    /// if needed. Duplicates are allowed.
    pub fn add_input(&mut self, path: &str, set: Option<&str>) {
        let set = set.unwrap_or(self.active_set.as_str()).to_string();
        self.file_sets
            .get_or_insert_with(BTreeMap::new)
            .entry(set)
            .or_default()
            .push(path.to_string());
    }

    /// Remove the first occurrence of `path` from `set` (the active set when
    /// `None`).
    ///
    /// A path that is not in the set is reported through `log` and leaves the
    /// set untouched (`Ok(false)`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SetNotFound`] if the set does not exist.
    pub fn remove_input(
        &mut self,
        path: &str,
        set: Option<&str>,
        log: &dyn Log,
    ) -> Result<bool, ConfigError> {
        let set = set.unwrap_or(self.active_set.as_str()).to_string();
        let Some(inputs) = self
            .file_sets
            .as_mut()
            .and_then(|sets| sets.get_mut(&set))
        else {
            return Err(ConfigError::SetNotFound {
                config: self.name.clone(),
                set,
            });
        };

        if inputs.remove_first(path) {
            Ok(true)
        } else {
            log.warn(&format!("file {path} not in inputs of set {set}"));
            Ok(false)
        }
    }

    /// Make `set` the active set. Referencing a set that does not exist is
    /// allowed; it is materialised by the next [`add_input`](Self::add_input).
    pub fn change_active_set(&mut self, set: &str, log: &dyn Log) {
        if !self.has_set(set) {
            log.info(&format!(
                "set {set} not found in {}, creating new set",
                self.name
            ));
        }
        self.active_set = set.to_string();
    }

    /// Inputs of the active set, or `None` if the set does not exist.
    #[must_use]
    pub fn active_inputs(&self) -> Option<&[String]> {
        self.file_sets
            .as_ref()?
            .get(&self.active_set)
            .map(FileSet::paths)
    }
}
