//! Document parsing and bundled configuration sources.
//!
//! The store starts from [`DEFAULT_DOCUMENT`] and then merges every selected
//! document of a [`Bundle`], in bundle order.

use crate::error::{ConfigError, ConfigResult};
use crate::value::{Mapping, mapping_from_yaml};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Baseline tree before any bundled or external document is merged.
pub const DEFAULT_DOCUMENT: &str = "\
server:
  host: ${SERVER_HOST:*}
  port: ${SERVER_PORT::80}
  maxSize: ${MAX_REQUEST_BODY_SIZE:104857600}
service:
  name: ${SERVICE_NAME:app}
  prod: ${PROD:false}
";

/// Name of the single document read in [`Selection::ConfigOnly`] mode.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Extension a bundled document must carry in [`Selection::AllYml`] mode.
pub const YAML_EXTENSION: &str = "yml";

/// Parse a YAML document whose root must be a mapping.
///
/// An empty document (or one holding only `~`) yields an empty mapping.
pub fn parse_document(name: &str, bytes: &[u8]) -> ConfigResult<Mapping> {
    let raw: serde_yaml::Value =
        serde_yaml::from_slice(bytes).map_err(|e| ConfigError::parse(name, e))?;
    match raw {
        serde_yaml::Value::Null => Ok(Mapping::new()),
        serde_yaml::Value::Mapping(map) => mapping_from_yaml(name, map),
        other => Err(ConfigError::not_mapping(
            name,
            format!("top level must be a mapping, found {}", yaml_kind(&other)),
        )),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

/// Which bundle entries are treated as configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every entry whose path ends in `.yml`.
    #[default]
    AllYml,
    /// Only the top-level `config.yml`.
    ConfigOnly,
}

/// One bundled file.
#[derive(Debug, Clone)]
pub struct BundleEntry {
    /// Path relative to the bundle root, `/`-separated.
    pub path: String,
    pub content: Cow<'static, [u8]>,
}

/// Read-only collection of bundled files, keyed by relative path.
///
/// Typically built from `include_bytes!` data or from a directory shipped
/// alongside the binary.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    entries: Vec<BundleEntry>,
    selection: Selection,
}

impl Bundle {
    /// An empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bundle holding a single `config.yml`.
    pub fn config_only(content: impl Into<Cow<'static, [u8]>>) -> Self {
        Self::new()
            .with_entry(CONFIG_FILE_NAME, content)
            .with_selection(Selection::ConfigOnly)
    }

    /// Add a file. Files are merged in insertion order.
    pub fn with_entry(
        mut self,
        path: impl Into<String>,
        content: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Cow<'static, [u8]>>) {
        self.entries.push(BundleEntry {
            path: path.into(),
            content: content.into(),
        });
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Read every file under `dir`, in lexical path order.
    ///
    /// Any I/O failure while walking is an error.
    pub fn from_dir(dir: &Path) -> ConfigResult<Self> {
        let mut files = Vec::new();
        walk(dir, dir, &mut files)?;
        files.sort();

        let mut bundle = Self::new();
        for relative in files {
            let full = dir.join(&relative);
            let content = std::fs::read(&full).map_err(|e| ConfigError::read(&full, e))?;
            bundle.insert(relative, content);
        }
        debug!(dir = %dir.display(), files = bundle.entries.len(), "Loaded bundle directory");
        Ok(bundle)
    }

    /// All entries, selected or not.
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    /// Entries that are configuration documents under the current selection.
    pub fn documents(&self) -> impl Iterator<Item = &BundleEntry> {
        self.entries.iter().filter(|entry| self.is_selected(&entry.path))
    }

    fn is_selected(&self, path: &str) -> bool {
        match self.selection {
            Selection::AllYml => {
                Path::new(path).extension().and_then(|e| e.to_str()) == Some(YAML_EXTENSION)
            }
            Selection::ConfigOnly => path == CONFIG_FILE_NAME,
        }
    }
}

fn walk(base: &Path, dir: &Path, files: &mut Vec<String>) -> ConfigResult<()> {
    let walk_err = |e: std::io::Error| ConfigError::Walk {
        path: dir.to_path_buf(),
        source: e,
    };

    for entry in std::fs::read_dir(dir).map_err(walk_err)? {
        let entry = entry.map_err(walk_err)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(walk_err)?;

        if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "Skipping symlinked directory");
        } else if file_type.is_dir() {
            walk(base, &path, files)?;
        } else {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let relative: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            files.push(relative.join("/"));
        }
    }

    Ok(())
}
