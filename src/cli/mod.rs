//! CLI command definitions for yamlenv
//!
//! This module defines the CLI structure using clap's derive macros and the
//! small amount of glue `main` needs to print lookups.

use crate::config::ConfigStore;
use crate::value::Value;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Environment variable holding extra config files, separated like `PATH`.
pub const CONFIG_PATH_ENV: &str = "YAMLENV_CONFIG_PATH";

/// Output format for printed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Scalars as plain text, containers as JSON (default)
    #[default]
    Text,
    Json,
    Yaml,
}

/// Target type for `typed` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetType {
    String,
    Int,
    Float,
    Bool,
}

/// Query layered YAML configuration with environment placeholders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Extra YAML file to merge (repeatable, merged in order)
    #[arg(short, long, global = true)]
    pub config: Vec<PathBuf>,

    /// Directory of bundled `.yml` files merged over the defaults
    #[arg(short, long, global = true)]
    pub bundle_dir: Option<PathBuf>,

    /// Read only `config.yml` from the bundle directory
    #[arg(long, global = true)]
    pub config_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Raw lookup; prints `null` when absent
    Get { path: String },

    /// String lookup; literals are trimmed, absent paths print nothing
    String { path: String },

    /// Typed lookup; unconvertible values print the type's zero value
    Typed {
        path: String,
        #[arg(long = "as", value_enum)]
        target: TargetType,
    },

    /// Print the whole merged tree
    Dump {
        /// Leave placeholders unresolved
        #[arg(long)]
        raw: bool,
    },
}

/// External files to merge: `--config` values first, then `YAMLENV_CONFIG_PATH`.
pub fn config_files(cli: &Cli, env_value: Option<&OsStr>) -> Vec<PathBuf> {
    let mut files = cli.config.clone();
    if let Some(value) = env_value {
        files.extend(std::env::split_paths(value).filter(|p| !p.as_os_str().is_empty()));
    }
    files
}

/// Perform a typed lookup and box the result back into a [`Value`] for printing.
pub fn typed_lookup(store: &ConfigStore, path: &str, target: TargetType) -> Value {
    match target {
        TargetType::String => Value::String(store.get_typed::<String>(path)),
        TargetType::Int => Value::Integer(store.get_typed::<i64>(path)),
        TargetType::Float => Value::Float(store.get_typed::<f64>(path)),
        TargetType::Bool => Value::Bool(store.get_typed::<bool>(path)),
    }
}

/// Render a value for stdout.
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_typed_command() {
        let cli = Cli::parse_from(["yamlenv", "-c", "a.yml", "typed", "server.port", "--as", "int"]);
        assert_eq!(cli.config, vec![PathBuf::from("a.yml")]);
        assert!(matches!(
            cli.command,
            Command::Typed { ref path, target: TargetType::Int } if path == "server.port"
        ));
        assert_eq!(cli.log, "2");
    }

    #[test]
    fn test_config_files_appends_env_paths() {
        let cli = Cli::parse_from(["yamlenv", "--config", "first.yml", "dump"]);
        let joined = std::env::join_paths(["second.yml", "third.yml"]).unwrap();
        let files = config_files(&cli, Some(joined.as_os_str()));
        assert_eq!(
            files,
            vec![
                PathBuf::from("first.yml"),
                PathBuf::from("second.yml"),
                PathBuf::from("third.yml")
            ]
        );
        assert_eq!(config_files(&cli, None), vec![PathBuf::from("first.yml")]);
    }

    #[test]
    fn test_typed_lookup_uses_zero_values() {
        let store = ConfigStore::empty()
            .unwrap()
            .with_env(HashMap::<String, String>::new());
        assert_eq!(
            typed_lookup(&store, "server.maxSize", TargetType::Int),
            Value::Integer(104_857_600)
        );
        assert_eq!(typed_lookup(&store, "server.host", TargetType::Int), Value::Integer(0));
        assert_eq!(
            typed_lookup(&store, "service.prod", TargetType::Bool),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_render_formats() {
        let value = Value::from("app");
        assert_eq!(render(&value, OutputFormat::Text).unwrap(), "app");
        assert_eq!(render(&value, OutputFormat::Json).unwrap(), "\"app\"");
        assert_eq!(render(&value, OutputFormat::Yaml).unwrap(), "app");
        assert_eq!(render(&Value::Null, OutputFormat::Json).unwrap(), "null");
    }
}
