//! Error types for loading documents and typed lookups.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or querying a [`ConfigStore`](crate::config::ConfigStore).
///
/// Lookup-side variants (`NotFound`, `Unresolved`, `Coercion`) only surface
/// through `try_get`; the plain accessors degrade to null/zero values instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid YAML.
    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A document parsed but its root (or a key) is not usable as a mapping.
    #[error("{name}: {reason}")]
    NotMapping { name: String, reason: String },

    /// Walking a bundle directory failed.
    #[error("failed to walk bundle directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing is stored at the lookup path.
    #[error("no value at '{0}'")]
    NotFound(String),

    /// The value is a placeholder whose variable is unset and which has no fallback.
    #[error("placeholder at '{path}' has no value for ${{{name}}}")]
    Unresolved { path: String, name: String },

    /// The value exists but cannot be converted to the requested type.
    #[error("cannot convert {found} at '{path}' to {target}")]
    Coercion {
        path: String,
        found: &'static str,
        target: &'static str,
    },
}

impl ConfigError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(name: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            name: name.into(),
            source,
        }
    }

    pub fn not_mapping(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotMapping {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
