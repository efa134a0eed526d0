use derive_more::Display;
use time::OffsetDateTime;

use crate::selection::{CheckState, SyncState};
use crate::snapshot::{EntryKind, NodeAttributes};

/// Stable handle of a node inside one [`SelectionTree`](crate::tree::SelectionTree).
///
/// Slots are reused after deletion; the generation tells a stale handle apart
/// from the node now occupying its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("#{index}v{generation}")]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

/// A single file or directory entry of the selection tree.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    is_directory: bool,
    size: Option<u64>,
    modified: Option<OffsetDateTime>,
    pub(crate) check_state: CheckState,
    sync_state: SyncState,
    invalid: bool,
    changed: bool,
    baseline_check_state: Option<CheckState>,
    pub(crate) checked_child_count: usize,
    pub(crate) partial_child_count: usize,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            is_directory: kind == EntryKind::Directory,
            size: None,
            modified: None,
            check_state: CheckState::Unchecked,
            sync_state: SyncState::Unknown,
            invalid: false,
            changed: false,
            baseline_check_state: None,
            checked_child_count: 0,
            partial_child_count: 0,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    /// Sets the initial state of a node that is not linked into a tree yet.
    pub fn with_check_state(mut self, state: CheckState) -> Self {
        self.check_state = state;
        self
    }

    pub fn with_sync_state(mut self, state: SyncState) -> Self {
        self.sync_state = state;
        self
    }

    pub fn with_attributes(mut self, attributes: NodeAttributes) -> Self {
        self.check_state = attributes.check_state;
        self.apply_metadata(&attributes);
        self
    }

    /// Everything but the check state, which has to go through the tree so
    /// the parent's counters follow.
    pub(crate) fn apply_metadata(&mut self, attributes: &NodeAttributes) {
        self.size = attributes.size;
        self.modified = attributes.modified;
        self.sync_state = attributes.sync_state;
        self.invalid = attributes.invalid;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn kind(&self) -> EntryKind {
        if self.is_directory {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn modified(&self) -> Option<OffsetDateTime> {
        self.modified
    }

    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync_state
    }

    pub(crate) fn set_sync_state(&mut self, state: SyncState) {
        self.sync_state = state;
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub(crate) fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn checked_child_count(&self) -> usize {
        self.checked_child_count
    }

    pub fn partial_child_count(&self) -> usize {
        self.partial_child_count
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Begins an edit session on this node; must run before the new state is set.
    pub fn set_changed(&mut self) {
        self.mark_changed_from(self.check_state);
    }

    /// Like [`set_changed`](Node::set_changed) for callers that already
    /// replaced the state and kept the previous value.
    pub(crate) fn mark_changed_from(&mut self, previous: CheckState) {
        if self.baseline_check_state.is_none() {
            self.baseline_check_state = Some(previous);
        }
        self.changed = true;
    }

    /// True only while the state differs from the one captured when editing began.
    pub fn is_changed(&self) -> bool {
        self.changed && self.baseline_check_state != Some(self.check_state)
    }

    pub fn baseline_check_state(&self) -> Option<CheckState> {
        self.baseline_check_state
    }

    pub(crate) fn adjust_child_counts(&mut self, from: CheckState, to: CheckState) {
        self.uncount_child(from);
        self.count_child(to);
    }

    pub(crate) fn count_child(&mut self, state: CheckState) {
        match state {
            CheckState::Checked => self.checked_child_count += 1,
            CheckState::Partial => self.partial_child_count += 1,
            CheckState::Unchecked => {}
        }
    }

    pub(crate) fn uncount_child(&mut self, state: CheckState) {
        match state {
            CheckState::Checked => {
                self.checked_child_count = self.checked_child_count.saturating_sub(1)
            }
            CheckState::Partial => {
                self.partial_child_count = self.partial_child_count.saturating_sub(1)
            }
            CheckState::Unchecked => {}
        }
    }
}
