//! # CLI Argument Definitions
//!
//! Command-line structure of the `lineage` tool, built with `clap`.

use clap::{Parser, Subcommand, ValueEnum};
use lineage::domain::config::KeyOrder;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lineage")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect own and inherited fields of records in a Lineage document")]
pub struct Cli {
    /// Configuration file (TOML or JSON). `LINEAGE__*` variables still apply.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Key order, overriding `enumeration.order` from the configuration
    #[arg(long, global = true, value_enum)]
    pub order: Option<OrderArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the fields assigned on the record itself
    Own {
        /// Document describing templates and records (`.toml` or JSON)
        document: PathBuf,
        /// Name of the record in the document
        record: String,
        /// Print a JSON object instead of `key: value` lines
        #[arg(long)]
        json: bool,
    },
    /// Print every field a `for...in` loop would see, inherited ones included
    Visible {
        /// Document describing templates and records (`.toml` or JSON)
        document: PathBuf,
        /// Name of the record in the document
        record: String,
        /// Print a JSON array of entries instead of `key: value` lines
        #[arg(long)]
        json: bool,
    },
    /// Build every template and record of a document and report the totals
    Check {
        /// Document describing templates and records (`.toml` or JSON)
        document: PathBuf,
    },
}

/// Command-line spelling of [`KeyOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Keep insertion order
    Insertion,
    /// Array-index keys first, ascending, then the rest in insertion order
    IndexFirst,
}

impl From<OrderArg> for KeyOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Insertion => Self::Insertion,
            OrderArg::IndexFirst => Self::IndexFirst,
        }
    }
}
