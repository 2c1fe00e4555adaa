//! The registry: every config plus the global options, loaded from and saved
//! back to one YAML document.
pub mod document;

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{Config, FileSet, GlobalOptions, Outcome};
use crate::error::RegistryError;
use crate::fs;
use crate::logging::{Log, ReportStatus};

pub use document::Document;

const PAD: &str = "    ";

/// All configs known to one registry document.
#[derive(Debug)]
pub struct Registry {
    path: PathBuf,
    globals: Arc<GlobalOptions>,
    configs: BTreeMap<String, Config>,
    extra: BTreeMap<String, serde_yaml::Value>,
}

impl Registry {
    /// Read and parse the registry at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid registry
    /// document, or names a config twice.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, path)
    }

    /// Parse registry text as if it had been read from `path`.
    ///
    /// An empty document is an empty registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid registry document or
    /// names a config twice.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, RegistryError> {
        let document: Option<Document> = if text.trim().is_empty() {
            None
        } else {
            serde_yaml::from_str(text).map_err(|source| RegistryError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };
        let document = document.unwrap_or_default();

        let globals = Arc::new(GlobalOptions {
            substitution: document.substitution,
            config_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        });

        let mut configs = BTreeMap::new();
        for entry in document.configs.into_iter().flatten() {
            let name = entry.name.clone();
            if configs.contains_key(&name) {
                return Err(RegistryError::DuplicateConfig(name));
            }
            configs.insert(name, Config::from_entry(entry, Arc::clone(&globals)));
        }

        Ok(Self {
            path: path.to_path_buf(),
            globals,
            configs,
            extra: document.extra,
        })
    }

    /// Path the registry was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Global options shared by every config.
    #[must_use]
    pub const fn globals(&self) -> &Arc<GlobalOptions> {
        &self.globals
    }

    /// Config names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// Look up a config by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Config> {
        self.configs.get(name)
    }

    /// Look up a config by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Config> {
        self.configs.get_mut(name)
    }

    /// Register a new config with no file sets and the default set active.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] if `name` is taken.
    pub fn init(&mut self, name: &str, outfile: PathBuf) -> Result<&mut Config, RegistryError> {
        if self.configs.contains_key(name) {
            return Err(RegistryError::AlreadyExists(name.to_string()));
        }
        let config = Config::new(name, outfile, Arc::clone(&self.globals));
        Ok(self.configs.entry(name.to_string()).or_insert(config))
    }

    /// Reconfigure every config independently, reporting one result per
    /// config through `log`. Returns the number of configs that failed.
    ///
    /// Each config runs inside a `config` span so its log lines can be told
    /// apart.
    pub fn reconfigure_all(&self, log: &dyn Log, dry_run: bool) -> usize {
        let mut failures = 0;
        for (name, config) in &self.configs {
            let _span = tracing::info_span!("config", config = %name).entered();
            log.stage(&format!("Reconfiguring {name}"));
            let (status, detail) = match config.reconfigure(log, dry_run) {
                Ok(Outcome::Written(path)) => (ReportStatus::Written, path.display().to_string()),
                Ok(Outcome::DryRun(path)) => (ReportStatus::DryRun, path.display().to_string()),
                Ok(Outcome::NoOutfile) => (ReportStatus::Skipped, "no outfile".to_string()),
                Ok(Outcome::SetNotFound(set)) => {
                    (ReportStatus::Skipped, format!("set {set} not found"))
                }
                Ok(Outcome::Empty) => (ReportStatus::Skipped, "no input files read".to_string()),
                Err(e) => {
                    failures += 1;
                    log.error(&format!("{name}: {e}"));
                    (ReportStatus::Failed, e.to_string())
                }
            };
            log.report(name, status, Some(&detail));
        }
        failures
    }

    /// Rebuild the document from the current state.
    #[must_use]
    pub fn to_document(&self) -> Document {
        Document {
            substitution: self.globals.substitution.clone(),
            configs: Some(self.configs.values().map(Config::export).collect()),
            extra: self.extra.clone(),
        }
    }

    /// Write the registry back to the path it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), RegistryError> {
        self.save_to(&self.path)
    }

    /// Write the registry to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<(), RegistryError> {
        let text = serde_yaml::to_string(&self.to_document()).map_err(RegistryError::Serialize)?;
        fs::write_file(path, &text).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Human-readable description of one config, or `None` if unknown.
    #[must_use]
    pub fn render(&self, name: &str) -> Option<String> {
        self.configs.get(name).map(render_config)
    }

    /// Descriptions of every config, separated by blank lines.
    #[must_use]
    pub fn render_all(&self) -> String {
        self.configs
            .values()
            .map(render_config)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_set(set: &FileSet) -> String {
    format!("[{}]", set.paths().join(", "))
}

fn render_config(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", config.name());
    let _ = writeln!(out, "{PAD}infiles:");
    for (name, set) in config.sets() {
        let _ = writeln!(out, "{PAD}{PAD}{name}: {}", render_set(set));
    }
    let outfile = config
        .outfile()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    let _ = writeln!(out, "{PAD}outfile: {outfile}");
    let _ = writeln!(out, "{PAD}active_set: {}", config.active_set());
    out
}
