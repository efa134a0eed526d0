use crate::tree::NodeId;

/// Row ranges are inclusive, indices are positions among `parent`'s children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    RowsAboutToBeInserted {
        parent: NodeId,
        first: usize,
        last: usize,
    },
    RowsInserted {
        parent: NodeId,
        first: usize,
        last: usize,
    },
    RowsAboutToBeRemoved {
        parent: NodeId,
        first: usize,
        last: usize,
    },
    RowsRemoved {
        parent: NodeId,
        first: usize,
        last: usize,
    },
    /// The node's own row needs redisplay
    DataChanged { node: NodeId },
    /// Every child row of `parent` needs redisplay
    ChildrenChanged { parent: NodeId, count: usize },
}

impl TreeEvent {
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            TreeEvent::DataChanged { .. } | TreeEvent::ChildrenChanged { .. }
        )
    }
}
