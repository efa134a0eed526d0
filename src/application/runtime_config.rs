use std::path::PathBuf;

use crate::application::data::{PathList, Refresh, Selection};
use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub snapshot: PathBuf,
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub refreshes: Vec<Refresh>,
    pub selections: Vec<Selection>,
    pub show: Vec<PathList>,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let show = if cli.show.is_empty() {
            vec![PathList::Changed]
        } else {
            cli.show
        };
        Self {
            snapshot: cli.snapshot,
            root: cli.root,
            config: cli.config,
            refreshes: cli.refreshes,
            selections: cli.selections,
            show,
        }
    }
}
