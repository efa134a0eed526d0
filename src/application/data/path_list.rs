use clap::ValueEnum;

use selectree::selection::CheckState;

/// One of the path lists the driver can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PathList {
    Checked,
    Unchecked,
    Partial,
    /// Paths touched by refreshes and selections
    Changed,
}

impl PathList {
    pub fn check_state(&self) -> Option<CheckState> {
        match self {
            PathList::Checked => Some(CheckState::Checked),
            PathList::Unchecked => Some(CheckState::Unchecked),
            PathList::Partial => Some(CheckState::Partial),
            PathList::Changed => None,
        }
    }
}
