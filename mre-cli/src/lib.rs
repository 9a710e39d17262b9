//! Offline validation for an `aer/conf.toml` and its mod directory,
//! grounded on `zephyr-cli`'s "validate before deploy" shape: catch a
//! duplicate mod name or a missing shared library before the host process
//! ever tries to boot with them.

pub mod error;
pub mod parser;

pub use error::ValidationError;
pub use parser::ModRoster;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `mre` — the MRE's companion CLI.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a conf.toml and its mod directory offline.
    Validate {
        /// Path to `aer/conf.toml`.
        #[arg(short, long, default_value = "aer/conf.toml")]
        conf: PathBuf,

        /// Directory holding the mods' shared libraries.
        #[arg(short, long, default_value = "aer/mods")]
        mods_dir: PathBuf,
    },
}
