use snafu::prelude::*;
use tracing::{debug, info};

use crate::config::SelectionConfig;
use crate::events::{Notifier, TreeEvent, TreeObserver};
use crate::selection::{CheckState, SyncState};
use crate::tree::error::*;
use crate::tree::{ChangeTracker, Node, NodeId};

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed selection tree with a synthetic, never-selectable root.
///
/// Parents own their children through id lists; a child only keeps its
/// parent's id for upward walks and counter updates.
#[derive(Debug)]
pub struct SelectionTree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    reserved_names: Vec<String>,
    pub(crate) changes: ChangeTracker,
    pub(crate) notifier: Notifier,
}

impl SelectionTree {
    pub fn new() -> Self {
        Self::with_config(&SelectionConfig::default())
    }

    pub fn with_config(config: &SelectionConfig) -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::directory("")),
            }],
            free: Vec::new(),
            root,
            reserved_names: config.reserved_names().to_vec(),
            changes: ChangeTracker::default(),
            notifier: Notifier::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn subscribe(&mut self, observer: Box<dyn TreeObserver>) {
        self.notifier.subscribe(observer);
    }

    pub fn change_tracker(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Names that are skipped at the top level of the tree.
    pub fn is_reserved(&self, parent: NodeId, name: &str) -> bool {
        parent == self.root && self.reserved_names.iter().any(|n| n == name)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .context(InvalidReferenceSnafu { id })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .context(InvalidReferenceSnafu { id })
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Links `child` as the last child of `parent` without notifying observers.
    ///
    /// The parent's counters pick up the child's current state.
    pub(crate) fn link_child(&mut self, parent: NodeId, mut child: Node) -> Result<NodeId, TreeError> {
        let parent_node = self.node(parent)?;
        ensure!(
            parent_node.is_directory(),
            TypeMismatchSnafu {
                name: parent_node.name().to_string(),
            }
        );

        debug!("Appending child '{}'", child.name());
        child.parent = Some(parent);
        child.children.clear();
        child.checked_child_count = 0;
        child.partial_child_count = 0;
        let state = child.check_state;

        let id = self.allocate(child);
        let parent_node = self.node_mut(parent)?;
        parent_node.children.push(id);
        parent_node.count_child(state);
        Ok(id)
    }

    /// Appends a fresh node under `parent` and returns its id.
    pub fn append_child(&mut self, parent: NodeId, child: Node) -> Result<NodeId, TreeError> {
        let parent_node = self.node(parent)?;
        ensure!(
            parent_node.is_directory(),
            TypeMismatchSnafu {
                name: parent_node.name().to_string(),
            }
        );

        let row = parent_node.child_count();
        self.notifier.emit(TreeEvent::RowsAboutToBeInserted {
            parent,
            first: row,
            last: row,
        });
        let id = self.link_child(parent, child)?;
        self.notifier.emit(TreeEvent::RowsInserted {
            parent,
            first: row,
            last: row,
        });
        Ok(id)
    }

    /// Deletes the child at `row` of `parent` together with its whole subtree.
    pub fn remove_child(&mut self, parent: NodeId, row: usize) -> Result<(), TreeError> {
        let child = self
            .child(parent, row)?
            .context(RowOutOfRangeSnafu { parent, row })?;

        self.notifier.emit(TreeEvent::RowsAboutToBeRemoved {
            parent,
            first: row,
            last: row,
        });
        let state = self.node(child)?.check_state;
        let parent_node = self.node_mut(parent)?;
        parent_node.children.remove(row);
        parent_node.uncount_child(state);
        self.release_subtree(child);
        self.notifier.emit(TreeEvent::RowsRemoved {
            parent,
            first: row,
            last: row,
        });
        Ok(())
    }

    /// Deletes every child of `parent`.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<(), TreeError> {
        let count = self.child_count(parent)?;
        if count == 0 {
            return Ok(());
        }

        self.notifier.emit(TreeEvent::RowsAboutToBeRemoved {
            parent,
            first: 0,
            last: count - 1,
        });
        let parent_node = self.node_mut(parent)?;
        let children = std::mem::take(&mut parent_node.children);
        parent_node.checked_child_count = 0;
        parent_node.partial_child_count = 0;
        for child in children {
            self.release_subtree(child);
        }
        self.notifier.emit(TreeEvent::RowsRemoved {
            parent,
            first: 0,
            last: count - 1,
        });
        Ok(())
    }

    fn release_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
            }
        }
    }

    /// Moves `id` to `state`, keeping the parent's counters in step.
    ///
    /// Returns whether the state actually changed. The node's own counters are
    /// untouched.
    pub fn set_check_state(&mut self, id: NodeId, state: CheckState) -> Result<bool, TreeError> {
        let node = self.node(id)?;
        let previous = node.check_state;
        if previous == state {
            return Ok(false);
        }
        let name = node.name().to_string();
        let parent = node.parent;

        if let Some(parent) = parent {
            let parent_node = self.node_mut(parent)?;
            ensure!(
                parent_node.children.contains(&id),
                BrokenLinkageSnafu { name: name.clone() }
            );
            parent_node.adjust_child_counts(previous, state);
        }

        info!("Entry '{}' is {}", name, state);
        self.node_mut(id)?.check_state = state;
        Ok(true)
    }

    /// Child count without entries that exist only locally.
    pub fn remote_child_count(&self, id: NodeId) -> Result<usize, TreeError> {
        let mut count = 0;
        for child in self.children(id)? {
            if self.node(*child)?.sync_state().is_remote() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Re-derives the state of `id` from its child counters.
    ///
    /// Returns whether the state changed, which tells callers whether the
    /// parent needs the same treatment.
    pub fn update_check_state(&mut self, id: NodeId) -> Result<bool, TreeError> {
        let node = self.node(id)?;
        let checked = node.checked_child_count;
        let partial = node.partial_child_count;

        let derived = if checked == 0 && partial == 0 {
            CheckState::Unchecked
        } else if self.remote_child_count(id)? != checked {
            CheckState::Partial
        } else {
            CheckState::Checked
        };

        self.set_check_state(id, derived)
    }

    pub fn set_changed(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.node_mut(id)?.set_changed();
        Ok(())
    }

    pub fn set_sync_state(&mut self, id: NodeId, state: SyncState) -> Result<(), TreeError> {
        self.node_mut(id)?.set_sync_state(state);
        self.notifier.emit(TreeEvent::DataChanged { node: id });
        Ok(())
    }

    pub fn set_invalid(&mut self, id: NodeId, invalid: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.set_invalid(invalid);
        self.notifier.emit(TreeEvent::DataChanged { node: id });
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(self.node(id)?.children())
    }

    pub fn child_count(&self, id: NodeId) -> Result<usize, TreeError> {
        Ok(self.node(id)?.child_count())
    }

    /// The child at `row`, or `None` when `row` is out of range.
    pub fn child(&self, parent: NodeId, row: usize) -> Result<Option<NodeId>, TreeError> {
        Ok(self.children(parent)?.get(row).copied())
    }

    /// Position of `id` among its siblings; the root sits at row 0.
    pub fn row(&self, id: NodeId) -> Result<usize, TreeError> {
        let node = self.node(id)?;
        let Some(parent) = node.parent else {
            return Ok(0);
        };
        self.children(parent)?
            .iter()
            .position(|child| *child == id)
            .context(BrokenLinkageSnafu {
                name: node.name().to_string(),
            })
    }

    pub fn child_names(&self, id: NodeId) -> Result<Vec<String>, TreeError> {
        self.children(id)?
            .iter()
            .map(|child| self.node(*child).map(|node| node.name().to_string()))
            .collect()
    }

    pub fn find_child(&self, parent: NodeId, name: &str) -> Result<Option<NodeId>, TreeError> {
        for child in self.children(parent)? {
            if self.node(*child)?.name() == name {
                return Ok(Some(*child));
            }
        }
        Ok(None)
    }

    /// `/`-joined names from below the root down to `id`; empty for the root.
    pub fn full_path(&self, id: NodeId) -> Result<String, TreeError> {
        let mut names = Vec::new();
        let mut current = id;
        while current != self.root {
            let node = self.node(current)?;
            names.push(node.name());
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        names.reverse();
        Ok(names.join("/"))
    }

    /// The full path with a leading `/`, as reported to collaborators.
    pub fn absolute_path(&self, id: NodeId) -> Result<String, TreeError> {
        Ok(format!("/{}", self.full_path(id)?))
    }

    /// Resolves a `/`-separated path relative to the root.
    pub fn resolve(&self, path: &str) -> Result<NodeId, TreeError> {
        let mut current = self.root;
        for name in path.split('/').filter(|name| !name.is_empty()) {
            current = self.find_child(current, name)?.context(PathNotFoundSnafu {
                path: path.to_string(),
            })?;
        }
        Ok(current)
    }
}

impl Default for SelectionTree {
    fn default() -> Self {
        Self::new()
    }
}
