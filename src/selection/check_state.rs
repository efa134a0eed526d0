use std::str::FromStr;

use derive_more::Display;
use snafu::Snafu;

/// Tri-state selection value of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum CheckState {
    #[default]
    #[display("unchecked")]
    Unchecked,
    #[display("checked")]
    Checked,
    #[display("partially checked")]
    Partial,
}

impl CheckState {
    /// Derives the selection of a snapshot entry from its `ignored` and `partial` flags.
    pub fn from_flags(ignored: bool, partial: bool) -> Self {
        if partial {
            CheckState::Partial
        } else if !ignored {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

impl FromStr for CheckState {
    type Err = ParseCheckStateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "checked" => Ok(CheckState::Checked),
            "unchecked" => Ok(CheckState::Unchecked),
            "partial" | "partially checked" => Ok(CheckState::Partial),
            _ => Err(ParseCheckStateError {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("'{}' is not a check state (expected checked, unchecked or partial)", value))]
pub struct ParseCheckStateError {
    value: String,
}
