use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::selection::SyncState;
use crate::snapshot::{Entry, EntryKind};
use crate::tree::{NodeId, SelectionTree, TreeError};

/// Metadata view of one node, as handed to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub size: Option<u64>,
    pub modified: Option<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub syncstate: SyncState,
    pub children: usize,
}

impl SelectionTree {
    /// Records describing the direct children of `dir`, for the listing
    /// service to extend with metadata before they come back for reconciliation.
    ///
    /// Each record carries the child's name, type and sync state, plus bare
    /// name records of its own children.
    pub fn listing_request(&self, dir: NodeId) -> Result<Vec<Entry>, TreeError> {
        let mut request = Vec::new();
        for child in self.children(dir)? {
            let node = self.node(*child)?;
            let grandchildren = if node.is_directory() {
                Some(
                    self.child_names(*child)?
                        .into_iter()
                        .map(Entry::name_only)
                        .collect(),
                )
            } else {
                None
            };

            request.push(Entry {
                name: Some(node.name().to_string()),
                kind: Some(node.kind()),
                syncstate: Some(node.sync_state()),
                children: grandchildren,
                ..Default::default()
            });
        }
        Ok(request)
    }

    pub fn summary(&self, id: NodeId) -> Result<NodeSummary, TreeError> {
        let node = self.node(id)?;
        Ok(NodeSummary {
            size: node.size(),
            modified: node
                .modified()
                .and_then(|modified| modified.format(&Rfc3339).ok()),
            kind: node.kind(),
            syncstate: node.sync_state(),
            children: node.child_count(),
        })
    }
}
