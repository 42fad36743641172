//! # Lineage Inspector
//!
//! Command line front-end over the Lineage libraries. It loads a document of
//! templates and records and shows, for a named record, either the fields it owns or
//! everything a naive `for...in` loop would see.
//!
//! ## Example
//! ```no_run
//! use clap::Parser;
//! use lineage::domain::config::LineageConfig;
//! use lineage_inspect::{Cli, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     let cli = Cli::parse_from(["lineage", "own", "garage.json", "camry"]);
//!     run(&cli, LineageConfig::default(), &mut std::io::stdout().lock())
//! }
//! ```

mod args;
mod render;

pub use crate::args::{Cli, Command, OrderArg};

use anyhow::{Context, Result, anyhow, bail};
use lineage::domain::config::{LineageConfig, LoggingConfig};
use lineage::domain::document::DocumentSpec;
use lineage::kernel::config::ConfigLoader;
use lineage::record::{Catalog, Record, VisibleEntry};
use lineage_logger::{Logger, parse_level, parse_rotation};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

const LOG_NAME: &str = "lineage";

/// Loads the configuration: defaults, then the `--config` file, then `LINEAGE__*`
/// variables, then the command line overrides.
///
/// # Errors
/// Returns an error if the file is missing or any source is malformed.
pub fn load_config(cli: &Cli) -> Result<LineageConfig> {
    let loader = ConfigLoader::new();
    let loader = match &cli.config {
        Some(path) => loader.file(path),
        None => loader,
    };

    let mut config: LineageConfig = loader.load().context("Configuration is malformed")?;
    if let Some(order) = cli.order {
        config.enumeration.order = order.into();
    }
    Ok(config)
}

/// Installs the global logger from the `logging` section.
///
/// Every setting is validated before anything is installed, so a bad level, rotation,
/// filter or retention fails even when no log directory is configured.
///
/// # Errors
/// Returns an error for invalid settings, an unusable log directory, or a logger
/// that is already installed.
pub fn init_logger(logging: &LoggingConfig) -> Result<Logger> {
    let level = parse_level(&logging.level).context("Invalid logging.level")?;
    let rotation = parse_rotation(&logging.rotation).context("Invalid logging.rotation")?;

    let mut builder = Logger::builder().name(LOG_NAME).level(level);
    if let Some(filter) = &logging.filter {
        builder = builder.env_filter(filter.as_str());
    }

    let logger = match &logging.directory {
        Some(directory) => builder
            .path(directory)
            .rotation(rotation)
            .max_files(logging.max_files)
            .json(logging.json)
            .init()?,
        None if logging.max_files == 0 => {
            bail!("Invalid logging.max_files: must be greater than zero")
        },
        None => builder.init()?,
    };
    debug!(level = %level, directory = ?logging.directory, "Logger installed");
    Ok(logger)
}

/// Reads a document. Files ending in `.toml` are parsed as TOML, everything else as
/// JSON.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<DocumentSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;

    let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    debug!(path = %path.display(), is_toml, "Parsing document");

    if is_toml {
        toml::from_str(&text).with_context(|| format!("Invalid TOML document {}", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON document {}", path.display()))
    }
}

/// Executes the parsed command, writing its report to `out`.
///
/// # Errors
/// Returns an error for unreadable documents, unknown records, broken template
/// chains, invalid settings, or failed writes.
pub fn run(cli: &Cli, config: LineageConfig, out: &mut impl Write) -> Result<()> {
    let enumerator = lineage::enumerator(&config)?;

    match &cli.command {
        Command::Own { document, record, json } => {
            let catalog = open(document)?;
            let record = find(&catalog, record)?;
            let entries = enumerator.own_entries(record);
            if *json {
                render::own_json(out, entries)?;
            } else {
                render::own_text(out, entries)?;
            }
        },
        Command::Visible { document, record, json } => {
            let catalog = open(document)?;
            let found = find(&catalog, record)?;
            let entries: Vec<VisibleEntry> = enumerator
                .visible_entries(found)
                .with_context(|| format!("Failed to enumerate record '{record}'"))?
                .collect();
            if *json {
                render::visible_json(out, &entries)?;
            } else {
                render::visible_text(out, entries)?;
            }
        },
        Command::Check { document } => {
            let catalog = open(document)?;
            info!(document = %document.display(), "Document is valid");
            writeln!(
                out,
                "{} templates, {} records",
                catalog.template_count(),
                catalog.record_count()
            )?;
        },
    }

    Ok(())
}

fn open(document: &Path) -> Result<Catalog> {
    let spec = load_document(document)?;
    Catalog::from_spec(&spec).with_context(|| format!("Invalid document {}", document.display()))
}

fn find<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Record> {
    catalog.record(name).ok_or_else(|| {
        let known = catalog.record_names().collect::<Vec<_>>().join(", ");
        anyhow!("Unknown record '{name}' (known records: {known})")
    })
}
