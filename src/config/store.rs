//! The configuration store: merged tree plus guarded lookups.

use super::loader::{Bundle, DEFAULT_DOCUMENT, parse_document};
use super::merge::shallow_merge;
use super::path::lookup as lookup_path;
use crate::coerce::{FromValue, coerce_or_default};
use crate::error::{ConfigError, ConfigResult};
use crate::placeholder::{self, EnvLookup, ProcessEnv, Resolved};
use crate::value::{Mapping, Value};
use std::fmt;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

/// Merged configuration tree with placeholder-aware accessors.
///
/// A store only exists once construction succeeded, so every instance is
/// ready for lookups. [`add`](Self::add) takes the write lock for the merge;
/// lookups take the read lock for the traversal only, then resolve and coerce
/// a cloned value outside of it.
pub struct ConfigStore {
    tree: RwLock<Mapping>,
    env: Box<dyn EnvLookup>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("tree", &*self.read())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Build the tree from [`DEFAULT_DOCUMENT`] and every selected bundle document.
    ///
    /// Fails if any of those documents cannot be parsed; no store is produced.
    pub fn new(bundle: &Bundle) -> ConfigResult<Self> {
        let mut tree = parse_document("defaults", DEFAULT_DOCUMENT.as_bytes())?;

        let mut merged = 0;
        for entry in bundle.documents() {
            let doc = parse_document(&entry.path, &entry.content)?;
            debug!(file = %entry.path, keys = doc.len(), "Merging bundled document");
            shallow_merge(&mut tree, doc);
            merged += 1;
        }

        info!(bundled = merged, keys = tree.len(), "Configuration loaded");
        Ok(Self {
            tree: RwLock::new(tree),
            env: Box::new(ProcessEnv),
        })
    }

    /// A store holding only the default document.
    pub fn empty() -> ConfigResult<Self> {
        Self::new(&Bundle::new())
    }

    /// Resolve placeholders against `env` instead of the process environment.
    pub fn with_env(mut self, env: impl EnvLookup + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Merge an external YAML file, logging (not returning) any failure.
    ///
    /// On failure the tree is left exactly as it was.
    pub fn add(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Err(e) = self.try_add(path) {
            warn!(file = %path.display(), error = %e, "Failed to add configuration file");
        }
    }

    /// Merge an external YAML file, returning any read or parse failure.
    pub fn try_add(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ConfigError::read(path, e))?;
        let doc = parse_document(&path.display().to_string(), &bytes)?;
        self.merge(path.display(), doc);
        Ok(())
    }

    /// Merge an in-memory YAML document, logging any failure.
    pub fn add_str(&self, name: &str, yaml: &str) {
        if let Err(e) = self.try_add_str(name, yaml) {
            warn!(document = name, error = %e, "Failed to add configuration document");
        }
    }

    /// Merge an in-memory YAML document.
    pub fn try_add_str(&self, name: &str, yaml: &str) -> ConfigResult<()> {
        let doc = parse_document(name, yaml.as_bytes())?;
        self.merge(name, doc);
        Ok(())
    }

    fn merge(&self, source: impl fmt::Display, doc: Mapping) {
        debug!(%source, keys = doc.len(), "Merging document");
        let mut tree = self.tree.write().unwrap_or_else(PoisonError::into_inner);
        shallow_merge(&mut tree, doc);
    }

    fn read(&self) -> RwLockReadGuard<'_, Mapping> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, path: &str) -> Option<Value> {
        lookup_path(&self.read(), path).cloned()
    }

    /// Raw lookup: placeholders resolved, no trimming, no coercion.
    ///
    /// Returns `None` for a missing path or an unresolvable placeholder.
    pub fn get(&self, path: &str) -> Option<Value> {
        placeholder::resolve(self.lookup(path)?, self.env.as_ref())
    }

    /// String lookup. Literal strings are trimmed; non-strings are converted;
    /// anything missing or unconvertible yields `""`. A placeholder that
    /// cannot be resolved comes back as its own trimmed text.
    pub fn get_string(&self, path: &str) -> String {
        match self.lookup(path) {
            Some(Value::String(text)) => placeholder::resolve_trimmed(&text, self.env.as_ref()),
            Some(other) => coerce_or_default(&other),
            None => String::new(),
        }
    }

    /// Typed lookup, yielding `T::default()` on any failure.
    pub fn get_typed<T: FromValue + Default>(&self, path: &str) -> T {
        self.try_get(path).unwrap_or_else(|e| {
            debug!(path, error = %e, "Typed lookup fell back to default");
            T::default()
        })
    }

    /// Typed lookup that reports why it failed.
    pub fn try_get<T: FromValue>(&self, path: &str) -> ConfigResult<T> {
        let raw = self
            .lookup(path)
            .ok_or_else(|| ConfigError::NotFound(path.to_string()))?;

        let resolved = match raw {
            Value::String(text) => match placeholder::resolve_str(&text, self.env.as_ref()) {
                Resolved::Literal(_) => Value::String(text),
                Resolved::Substituted(value) => Value::String(value),
                Resolved::Unset { name } => {
                    return Err(ConfigError::Unresolved {
                        path: path.to_string(),
                        name,
                    });
                }
            },
            other => other,
        };

        T::from_value(&resolved).ok_or_else(|| ConfigError::Coercion {
            path: path.to_string(),
            found: resolved.type_name(),
            target: T::TARGET,
        })
    }

    /// True if something (possibly null) is stored at `path`.
    pub fn contains(&self, path: &str) -> bool {
        lookup_path(&self.read(), path).is_some()
    }

    /// Copy of the merged tree with placeholders left as written.
    pub fn snapshot(&self) -> Mapping {
        self.read().clone()
    }

    /// Copy of the merged tree with every placeholder resolved.
    pub fn resolved_snapshot(&self) -> Value {
        let tree = Value::Mapping(self.snapshot());
        placeholder::resolve_deep(&tree, self.env.as_ref())
    }
}
