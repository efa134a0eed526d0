use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{LogLevel, PathList, Refresh, Selection};

/// Builds a selection tree from a remote snapshot and prints path lists.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// JSON snapshot of the synchronized folder
    pub snapshot: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Directory searched for selectree.yaml
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// Explicit config file, must exist
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Reconcile a directory against a fresh listing, as DIR=LISTING.json
    #[clap(long = "refresh")]
    pub refreshes: Vec<Refresh>,

    /// Toggle an entry, as PATH=STATE
    #[clap(long = "select", short)]
    pub selections: Vec<Selection>,

    /// Path lists to print
    #[clap(long = "show", value_enum)]
    pub show: Vec<PathList>,
}
