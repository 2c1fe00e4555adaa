// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed workspace holding a registry
// document and its input files, plus a fluent builder so each test can set
// up an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser;
use rtk_cli::cli::Cli;
use rtk_cli::commands;
use rtk_cli::logging::Logger;
use rtk_cli::registry::Registry;

/// File name of the registry document inside the workspace.
pub const REGISTRY_FILE: &str = "config.yaml";

/// An isolated workspace backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct Workspace {
    /// Temporary directory holding the registry and all input files.
    pub root: tempfile::TempDir,
}

impl Workspace {
    /// Absolute path of `rel` inside the workspace.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Path of the registry document.
    pub fn registry_path(&self) -> PathBuf {
        self.path(REGISTRY_FILE)
    }

    /// Read `rel` as text.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("read workspace file")
    }

    /// Load the registry document as it is on disk.
    pub fn load(&self) -> Registry {
        Registry::load(&self.registry_path()).expect("load registry")
    }

    /// Run `rtk -c <registry> <args...>` and return the logger with the
    /// recorded results alongside the command's result.
    pub fn run(&self, args: &[&str]) -> (anyhow::Result<()>, Logger) {
        let registry = self.registry_path();
        let mut argv: Vec<&str> = vec!["rtk", "-c"];
        let registry = registry.to_str().expect("utf-8 temp path");
        argv.push(registry);
        argv.extend_from_slice(args);

        let cli = Cli::parse_from(argv);
        let log = Logger::new("test");
        let result = commands::run(&cli, &log);
        (result, log)
    }

    /// Like [`run`](Self::run) but panics if the command fails.
    pub fn run_ok(&self, args: &[&str]) -> Logger {
        let (result, log) = self.run(args);
        result.expect("command should succeed");
        log
    }
}

/// Fluent builder for [`Workspace`].
pub struct WorkspaceBuilder {
    ws: Workspace,
}

impl WorkspaceBuilder {
    /// Begin building an empty workspace.
    pub fn new() -> Self {
        Self {
            ws: Workspace {
                root: tempfile::tempdir().expect("create temp dir"),
            },
        }
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.ws.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write workspace file");
        self
    }

    /// Write the registry document. Every `{root}` in `template` is replaced
    /// with the workspace directory.
    pub fn with_registry(self, template: &str) -> Self {
        let root = self.ws.root.path().display().to_string();
        let content = template.replace("{root}", &root);
        self.with_file(REGISTRY_FILE, &content)
    }

    /// Finish building and return the workspace.
    pub fn build(self) -> Workspace {
        self.ws
    }
}

/// Canonical form of `path`, as stored by `add`.
pub fn canonical(path: &Path) -> String {
    dunce::canonicalize(path)
        .expect("canonicalize")
        .to_string_lossy()
        .into_owned()
}
