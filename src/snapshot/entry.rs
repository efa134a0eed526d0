use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::selection::SyncState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    #[display("FILE")]
    File,
    #[display("DIRECTORY")]
    Directory,
}

/// One record of a remote listing, nested for directories.
///
/// `name` and `type` are required by the listing contract but are modelled as
/// optional here: a record missing either is rejected by the tree (and
/// counted), not by the JSON parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// ISO-8601 timestamp as sent by the remote side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syncstate: Option<SyncState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Entry>>,
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(EntryKind::File),
            ..Default::default()
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<Entry>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(EntryKind::Directory),
            children: Some(children),
            ..Default::default()
        }
    }

    /// A bare `{name}` record, used for the nested child lists of listing requests.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn ignored(mut self, ignored: bool) -> Self {
        self.ignored = Some(ignored);
        self
    }

    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = Some(partial);
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = Some(invalid);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    pub fn sync_state(mut self, state: SyncState) -> Self {
        self.syncstate = Some(state);
        self
    }

    /// Name and kind, or `None` when the record lacks either required field.
    pub fn identity(&self) -> Option<(&str, EntryKind)> {
        match (&self.name, self.kind) {
            (Some(name), Some(kind)) => Some((name.as_str(), kind)),
            _ => None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == Some(EntryKind::Directory)
    }

    pub fn nested(&self) -> &[Entry] {
        self.children.as_deref().unwrap_or_default()
    }
}
