//! yamlenv
//!
//! Prints values from the layered configuration: built-in defaults, an
//! optional bundle directory, then any extra files, with `${ENV:default}`
//! placeholders resolved against the process environment.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;
use yamlenv::cli::{self, Cli, Command};
use yamlenv::config::{Bundle, ConfigStore, Selection};
use yamlenv::value::Value;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let mut bundle = match &cli.bundle_dir {
        Some(dir) => Bundle::from_dir(dir)
            .with_context(|| format!("Failed to load bundle {}", dir.display()))?,
        None => Bundle::new(),
    };
    if cli.config_only {
        bundle = bundle.with_selection(Selection::ConfigOnly);
    }

    let store = ConfigStore::new(&bundle).context("Failed to build configuration")?;

    let env_paths = std::env::var_os(cli::CONFIG_PATH_ENV);
    for file in cli::config_files(&cli, env_paths.as_deref()) {
        debug!(file = %file.display(), "Adding configuration file");
        store.add(&file);
    }

    let output = match &cli.command {
        Command::Get { path } => store.get(path).unwrap_or(Value::Null),
        Command::String { path } => Value::String(store.get_string(path)),
        Command::Typed { path, target } => cli::typed_lookup(&store, path, *target),
        Command::Dump { raw: true } => Value::Mapping(store.snapshot()),
        Command::Dump { raw: false } => store.resolved_snapshot(),
    };

    println!("{}", cli::render(&output, cli.format)?);
    Ok(())
}
