use std::path::PathBuf;
use std::str::FromStr;

use snafu::prelude::*;

use selectree::selection::{CheckState, ParseCheckStateError};

/// A user toggle given as `PATH=STATE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: String,
    pub state: CheckState,
}

impl FromStr for Selection {
    type Err = RequestParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (path, state) = value
            .rsplit_once('=')
            .context(MissingSeparatorSnafu { value })?;
        let state = state.parse().context(InvalidStateSnafu)?;
        Ok(Self {
            path: path.to_string(),
            state,
        })
    }
}

/// A fresh listing for one directory given as `DIR=LISTING.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    pub dir: String,
    pub listing: PathBuf,
}

impl FromStr for Refresh {
    type Err = RequestParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (dir, listing) = value
            .split_once('=')
            .context(MissingSeparatorSnafu { value })?;
        ensure!(!listing.is_empty(), MissingListingSnafu { value });
        Ok(Self {
            dir: dir.to_string(),
            listing: PathBuf::from(listing),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum RequestParseError {
    #[snafu(display("Expected '<path>=<value>', got '{}'", value))]
    MissingSeparator { value: String },
    #[snafu(display("Invalid check state"))]
    InvalidState { source: ParseCheckStateError },
    #[snafu(display("No listing file given in '{}'", value))]
    MissingListing { value: String },
}
