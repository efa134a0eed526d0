use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::SelectionConfig;
use crate::events::TreeEvent;
use crate::snapshot::{Entry, NodeAttributes};
use crate::tree::{Node, NodeId, SelectionTree, TreeError};

/// Outcome of turning snapshot records into nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub inserted: usize,
    /// Records rejected for a missing name or type, or for repeating a sibling's name
    pub skipped: usize,
}

impl SelectionTree {
    /// Builds a tree from a full snapshot of the synchronized folder.
    pub fn from_entries(entries: &[Entry]) -> Result<(Self, MaterializeReport), TreeError> {
        Self::build(&SelectionConfig::default(), entries)
    }

    pub fn build(config: &SelectionConfig, entries: &[Entry]) -> Result<(Self, MaterializeReport), TreeError> {
        let mut tree = Self::with_config(config);
        let report = tree.populate(tree.root(), entries)?;
        Ok((tree, report))
    }

    /// Appends fresh subtrees for `entries` under `parent`.
    ///
    /// Only the top-level range is announced to observers; nested levels are
    /// part of the inserted rows.
    pub fn populate(&mut self, parent: NodeId, entries: &[Entry]) -> Result<MaterializeReport, TreeError> {
        let mut report = MaterializeReport::default();
        self.materialize_children(parent, entries, true, &mut report)?;
        Ok(report)
    }

    pub(crate) fn materialize_children(
        &mut self,
        parent: NodeId,
        entries: &[Entry],
        announce: bool,
        report: &mut MaterializeReport,
    ) -> Result<(), TreeError> {
        let mut names: HashSet<String> = self.child_names(parent)?.into_iter().collect();
        let mut accepted = Vec::with_capacity(entries.len());

        for entry in entries {
            let Some((name, _)) = entry.identity() else {
                warn!("Skipping snapshot entry without name or type: {:?}", entry.name);
                report.skipped += 1;
                continue;
            };
            if self.is_reserved(parent, name) {
                debug!("Skipping reserved entry '{}'", name);
                continue;
            }
            if !names.insert(name.to_string()) {
                warn!("Skipping duplicate snapshot entry '{}'", name);
                report.skipped += 1;
                continue;
            }
            accepted.push(entry);
        }

        if accepted.is_empty() {
            return Ok(());
        }

        let first = self.child_count(parent)?;
        let last = first + accepted.len() - 1;
        if announce {
            self.notifier.emit(TreeEvent::RowsAboutToBeInserted { parent, first, last });
        }
        for entry in accepted {
            self.materialize(parent, entry, report)?;
        }
        if announce {
            self.notifier.emit(TreeEvent::RowsInserted { parent, first, last });
        }
        Ok(())
    }

    fn materialize(&mut self, parent: NodeId, entry: &Entry, report: &mut MaterializeReport) -> Result<(), TreeError> {
        let Some((name, kind)) = entry.identity() else {
            report.skipped += 1;
            return Ok(());
        };

        let node = Node::new(name, kind).with_attributes(NodeAttributes::from(entry));
        let id = self.link_child(parent, node)?;
        report.inserted += 1;

        if entry.is_directory() {
            self.materialize_children(id, entry.nested(), false, report)?;
        }
        Ok(())
    }
}
