//! Global options shared by every config in a registry.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SubstitutionError;

/// The `substitution` section of the registry document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionOptions {
    /// Substitute in every config, not only those with `substitute: true`.
    #[serde(default)]
    pub default: bool,
    /// Directory holding the source document. Relative or missing
    /// directories are taken relative to the registry's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basepath: Option<PathBuf>,
    /// File name of the key/value source document inside `basepath`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Unrecognised keys, written back untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Process-wide options, loaded once and shared read-only by all configs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    /// Substitution settings from the registry document.
    pub substitution: SubstitutionOptions,
    /// Directory containing the registry document.
    pub config_dir: PathBuf,
}

impl GlobalOptions {
    /// Resolve the substitution base directory.
    ///
    /// `basepath` is used as-is when it names an existing directory;
    /// otherwise it is joined onto [`config_dir`](Self::config_dir).
    #[must_use]
    pub fn substitution_base(&self) -> PathBuf {
        let base = self
            .substitution
            .basepath
            .as_deref()
            .unwrap_or_else(|| Path::new(""));
        if !base.as_os_str().is_empty() && base.is_dir() {
            base.to_path_buf()
        } else {
            self.config_dir.join(base)
        }
    }

    /// Full path of the substitution source document.
    ///
    /// # Errors
    ///
    /// Returns [`SubstitutionError::NoSource`] when no source file is set.
    pub fn substitution_source(&self) -> Result<PathBuf, SubstitutionError> {
        let source = self
            .substitution
            .source
            .as_deref()
            .filter(|s| !s.as_os_str().is_empty())
            .ok_or(SubstitutionError::NoSource)?;
        Ok(self.substitution_base().join(source))
    }
}
