use snafu::prelude::*;
use tracing::debug;

use crate::events::TreeEvent;
use crate::selection::CheckState;
use crate::tree::error::*;
use crate::tree::{NodeId, SelectionTree};

impl SelectionTree {
    /// Applies a user's checkbox action to `id` and propagates it upwards.
    ///
    /// The node and every ancestor whose derived state changed are marked
    /// changed and tracked; the walk stops at the first ancestor that did not
    /// change, and never touches the root. Returns the nodes whose rows need
    /// redisplay, the toggled node first.
    pub fn apply_selection(&mut self, id: NodeId, state: CheckState) -> Result<Vec<NodeId>, TreeError> {
        ensure!(id != self.root(), RootNotSelectableSnafu);

        self.notifier.hold();
        let result = self.propagate(id, state);
        self.notifier.release();
        result
    }

    fn propagate(&mut self, id: NodeId, state: CheckState) -> Result<Vec<NodeId>, TreeError> {
        let previous = self.node(id)?.check_state();
        self.set_check_state(id, state)?;
        self.node_mut(id)?.mark_changed_from(previous);
        self.track(id)?;
        self.notifier.emit(TreeEvent::DataChanged { node: id });

        let mut touched = vec![id];
        let mut current = self.parent(id)?;
        while let Some(ancestor) = current {
            if ancestor == self.root() {
                break;
            }

            let previous = self.node(ancestor)?.check_state();
            if !self.update_check_state(ancestor)? {
                debug!("Propagation settled below {}", ancestor);
                break;
            }
            self.node_mut(ancestor)?.mark_changed_from(previous);
            self.track(ancestor)?;
            self.notifier.emit(TreeEvent::DataChanged { node: ancestor });
            touched.push(ancestor);

            current = self.parent(ancestor)?;
        }

        Ok(touched)
    }

    /// Records the absolute path of `id` in the change tracker.
    pub(crate) fn track(&mut self, id: NodeId) -> Result<(), TreeError> {
        let path = self.absolute_path(id)?;
        if self.changes.insert(path.clone()) {
            debug!("Tracking changed path {}", path);
        }
        Ok(())
    }
}
