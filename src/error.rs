//! Domain-specific error types for rtk.
//!
//! Library modules return typed errors ([`RegistryError`], [`ConfigError`],
//! [`SubstitutionError`]); command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via `?`.
//!
//! ```text
//! RegistryError: document load/save, config creation
//! ConfigError: file-set lookups, input reads, output writes
//! └── Substitution(SubstitutionError): substitution source loading
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, saving and mutating the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry document could not be read or written.
    #[error("IO error on registry file {}: {source}", path.display())]
    Io {
        /// Path of the registry document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The registry document is not valid YAML or has the wrong shape.
    #[error("Malformed registry file {}: {source}", path.display())]
    Parse {
        /// Path of the registry document.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The in-memory registry could not be serialized.
    #[error("Cannot serialize registry: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// Two entries in the document share a name.
    #[error("Duplicate config name '{0}' in registry")]
    DuplicateConfig(String),

    /// `init` was asked to create a config whose name is taken.
    #[error("Config '{0}' already exists")]
    AlreadyExists(String),
}

/// Errors from operations on a single config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The named file set does not exist in the config.
    #[error("Set '{set}' not found in config '{config}'")]
    SetNotFound {
        /// Config name.
        config: String,
        /// Requested set name.
        set: String,
    },

    /// An input file could not be read.
    #[error("Cannot read input {}: {source}", path.display())]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("Cannot write output {}: {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Substitution was enabled but could not be performed.
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
}

/// Errors from loading the substitution source document.
#[derive(Error, Debug)]
pub enum SubstitutionError {
    /// Substitution is enabled but no source file is configured.
    #[error("Substitution enabled but no source file configured")]
    NoSource,

    /// The source document could not be read.
    #[error("Cannot read substitution source {}: {source}", path.display())]
    Io {
        /// Path of the source document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source document is not a flat YAML mapping.
    #[error("Malformed substitution source {}: {source}", path.display())]
    Parse {
        /// Path of the source document.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}
