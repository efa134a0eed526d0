use std::path::Path;

use compio::fs;
use snafu::prelude::*;
use tracing::debug;

use crate::snapshot::Entry;

/// A remote listing: the entries of one directory level, nested for directories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<Entry>,
}

impl Snapshot {
    pub async fn read(path: &Path) -> Result<Self, SnapshotError> {
        debug!("Reading snapshot file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read snapshot file: {} bytes", bytes.len());

        let entries: Vec<Entry> = serde_json::from_slice(&bytes).context(ParseSnafu {
            file_path: path.display().to_string(),
        })?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl From<Vec<Entry>> for Snapshot {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl TryFrom<&str> for Snapshot {
    type Error = SnapshotError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let entries: Vec<Entry> = serde_json::from_str(contents).context(ParseSnafu {
            file_path: "<inline>".to_string(),
        })?;
        Ok(Self { entries })
    }
}

#[derive(Debug, Snafu)]
pub enum SnapshotError {
    #[snafu(display("Failed to read the snapshot file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Snapshot {} is not a list of entries", file_path))]
    ParseError {
        file_path: String,
        source: serde_json::Error,
    },
}
