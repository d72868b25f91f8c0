pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::error::CircuitError;

#[derive(Parser)]
#[clap(name = "arcwire")]
#[clap(author = "ArcWire Contributors")]
#[clap(version = "0.1.0")]
#[clap(about = "Circuit-diagram rendering engine", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a circuit YAML document to an SVG diagram.
    Render {
        #[clap(value_parser)]
        input: PathBuf,

        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Validate a circuit YAML document and report structural/electrical
    /// diagnostics.
    Validate {
        #[clap(value_parser)]
        input: PathBuf,

        #[clap(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error("failed to serialize diagnostics: {0}")]
    Serialize(#[from] serde_json::Error),
}
