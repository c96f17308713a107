//! yamlenv library
//!
//! Layered YAML configuration with `${ENV:default}` placeholders and
//! dotted-path lookups.

pub mod cli;
pub mod coerce;
pub mod config;
pub mod error;
pub mod placeholder;
pub mod value;

pub use coerce::FromValue;
pub use config::{Bundle, ConfigStore};
pub use error::{ConfigError, ConfigResult};
pub use value::{Mapping, Value};
