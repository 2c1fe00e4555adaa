//! Config file assembler.
//!
//! Keeps a registry of named configs. Each config has named file sets of
//! input paths and glob patterns; reconfiguring concatenates the active
//! set, optionally fills `${key}` placeholders from a key/value document,
//! and writes the result to the config's outfile. The registry lives in one
//! YAML document that is rewritten after every run.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: one config, its file sets and the reconfiguration
//!   pipeline (glob expansion, template substitution)
//! - **[`registry`]**: every config plus global options, loaded from and
//!   saved to the YAML document
//! - **[`commands`]**: top-level action orchestration (`list`,
//!   `reconfigure`, `init`, `add`, `set`, `delete`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod registry;
