use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Relationship of an entry to the remote side, independent of its selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    #[default]
    #[serde(alias = "Unknown")]
    #[display("unknown")]
    Unknown,
    /// Exists only locally, the remote side does not know it yet
    #[serde(alias = "NewLocal")]
    #[display("newlocal")]
    NewLocal,
    #[serde(alias = "Ignored")]
    #[display("ignored")]
    Ignored,
    #[serde(alias = "Conflict")]
    #[display("conflict")]
    Conflict,
    #[serde(alias = "Exists")]
    #[display("exists")]
    Exists,
    #[serde(alias = "Syncing")]
    #[display("syncing")]
    Syncing,
}

impl SyncState {
    /// Whether the entry counts towards its parent's remote child count.
    pub fn is_remote(&self) -> bool {
        !matches!(self, SyncState::NewLocal)
    }
}
