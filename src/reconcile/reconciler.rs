use hashlink::LinkedHashMap;
use tracing::{debug, info, warn};

use crate::events::TreeEvent;
use crate::reconcile::MaterializeReport;
use crate::selection::CheckState;
use crate::snapshot::{Entry, NodeAttributes};
use crate::tree::{NodeId, SelectionTree, TreeError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Existing children refreshed from a same-named record
    pub matched: usize,
    /// Existing children with no counterpart in the listing
    pub removed: usize,
    /// Nodes created for unmatched records, nested ones included
    pub inserted: usize,
    /// Matched directories whose children were rebuilt from the record
    pub rebuilt: usize,
    /// Records rejected for a missing name or type, or a repeated name
    pub skipped: usize,
}

impl ReconcileReport {
    pub fn is_structural(&self) -> bool {
        self.removed > 0 || self.inserted > 0 || self.rebuilt > 0
    }
}

impl SelectionTree {
    /// Merges a fresh listing of `parent`'s children into the live tree.
    ///
    /// Children are matched to records by name: matches are refreshed in
    /// place, children without a record are deleted and records without a
    /// child are materialized. A rename therefore shows up as a delete plus an
    /// insert. When `parent` was fully checked, every matched child is marked
    /// changed and tracked.
    ///
    /// Observers receive the events of the pass only after it has completed.
    pub fn reconcile(&mut self, parent: NodeId, entries: Vec<Entry>) -> Result<ReconcileReport, TreeError> {
        let node = self.node(parent)?;
        if !node.is_directory() {
            return Err(TreeError::TypeMismatch {
                name: node.name().to_string(),
            });
        }

        self.notifier.hold();
        let result = self.reconcile_children(parent, entries);
        self.notifier.release();
        result
    }

    fn reconcile_children(&mut self, parent: NodeId, entries: Vec<Entry>) -> Result<ReconcileReport, TreeError> {
        let mut report = ReconcileReport::default();
        // The root is never selectable, whatever its stored state says
        let is_root = parent == self.root();
        let was_fully_checked = !is_root && self.node(parent)?.check_state() == CheckState::Checked;

        let mut pending: LinkedHashMap<String, Entry> = LinkedHashMap::new();
        for entry in entries {
            let Some((name, _)) = entry.identity() else {
                warn!("Skipping listing entry without name or type: {:?}", entry.name);
                report.skipped += 1;
                continue;
            };
            if pending.contains_key(name) {
                warn!("Skipping duplicate listing entry '{}'", name);
                report.skipped += 1;
                continue;
            }
            pending.insert(name.to_string(), entry);
        }

        let mut stale = Vec::new();
        for child in self.children(parent)?.to_vec() {
            let node = self.node(child)?;
            let name = node.name().to_string();
            let kind = node.kind();

            let same_kind = pending
                .get(&name)
                .is_some_and(|entry| entry.kind == Some(kind));
            if !same_kind {
                stale.push(child);
                continue;
            }
            let Some(entry) = pending.remove(&name) else {
                continue;
            };

            self.refresh(child, &entry)?;
            report.matched += 1;
            if was_fully_checked {
                self.set_changed(child)?;
                self.track(child)?;
            }

            let Some(nested) = described_children(&entry) else {
                continue;
            };
            if nested.len() != self.child_count(child)? {
                debug!("Rebuilding children of '{}'", name);
                self.clear_children(child)?;
                let mut built = MaterializeReport::default();
                self.materialize_children(child, nested, true, &mut built)?;
                report.rebuilt += 1;
                report.inserted += built.inserted;
                report.skipped += built.skipped;
            }
        }

        for child in stale {
            let row = self.row(child)?;
            debug!("Removing '{}', it no longer exists remotely", self.node(child)?.name());
            self.remove_child(parent, row)?;
            report.removed += 1;
        }

        let remaining: Vec<Entry> = pending.into_iter().map(|(_, entry)| entry).collect();
        let built = self.populate(parent, &remaining)?;
        report.inserted += built.inserted;
        report.skipped += built.skipped;

        if !is_root {
            self.update_check_state(parent)?;
        }
        let count = self.child_count(parent)?;
        self.notifier.emit(TreeEvent::DataChanged { node: parent });
        self.notifier.emit(TreeEvent::ChildrenChanged { parent, count });

        info!(
            "Reconciled '{}': {} matched, {} removed, {} inserted, {} skipped",
            self.full_path(parent)?,
            report.matched,
            report.removed,
            report.inserted,
            report.skipped
        );
        Ok(report)
    }

    /// Applies a record's fields to a node that is already linked.
    fn refresh(&mut self, id: NodeId, entry: &Entry) -> Result<(), TreeError> {
        let attributes = NodeAttributes::from(entry);
        self.set_check_state(id, attributes.check_state)?;
        self.node_mut(id)?.apply_metadata(&attributes);
        Ok(())
    }
}

/// Nested records of a directory entry, when they fully describe its
/// children. A one-level listing carries no nested list, or bare name records
/// only, and says nothing about the children to rebuild.
fn described_children(entry: &Entry) -> Option<&[Entry]> {
    if !entry.is_directory() {
        return None;
    }
    entry
        .children
        .as_deref()
        .filter(|nested| nested.iter().all(|record| record.identity().is_some()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use crate::selection::SyncState;

    fn music_listing() -> Vec<Entry> {
        vec![
            Entry::file("a.ogg").ignored(false).size(100),
            Entry::file("b.ogg").size(200),
            Entry::directory(
                "live",
                vec![Entry::file("c.ogg").ignored(false), Entry::file("d.ogg")],
            )
            .partial(true),
        ]
    }

    fn music_tree() -> (SelectionTree, NodeId) {
        let snapshot = vec![Entry::directory("music", music_listing()).partial(true)];
        let (tree, _) = SelectionTree::from_entries(&snapshot).unwrap();
        let music = tree.resolve("/music").unwrap();
        (tree, music)
    }

    fn assert_counters_hold(tree: &SelectionTree, id: NodeId) {
        let node = tree.node(id).unwrap();
        let mut checked = 0;
        let mut partial = 0;
        for child in node.children() {
            match tree.node(*child).unwrap().check_state() {
                CheckState::Checked => checked += 1,
                CheckState::Partial => partial += 1,
                CheckState::Unchecked => {}
            }
            assert_counters_hold(tree, *child);
        }
        assert_eq!(node.checked_child_count(), checked, "checked count of {}", node.name());
        assert_eq!(node.partial_child_count(), partial, "partial count of {}", node.name());
    }

    #[test]
    fn test_unchanged_listing_is_a_no_op() {
        let (mut tree, music) = music_tree();
        let log = EventLog::new();
        tree.subscribe(Box::new(log.clone()));

        let report = tree.reconcile(music, music_listing()).unwrap();

        assert_eq!(report.matched, 3);
        assert!(!report.is_structural());
        assert!(log.events().iter().all(|event| !event.is_structural()));
        assert!(tree.changed_paths().is_empty());
        assert_eq!(tree.child_names(music).unwrap(), vec!["a.ogg", "b.ogg", "live"]);
        assert_eq!(tree.node(music).unwrap().check_state(), CheckState::Partial);
        assert_counters_hold(&tree, tree.root());
    }

    #[test]
    fn test_dropped_entry_removes_only_that_node() {
        let (mut tree, music) = music_tree();
        let a = tree.resolve("/music/a.ogg").unwrap();
        let live = tree.resolve("/music/live").unwrap();
        let listing = music_listing()
            .into_iter()
            .filter(|entry| entry.name.as_deref() != Some("b.ogg"))
            .collect();

        let report = tree.reconcile(music, listing).unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(report.inserted, 0);
        assert_eq!(tree.child_names(music).unwrap(), vec!["a.ogg", "live"]);
        assert_eq!(tree.node(a).unwrap().check_state(), CheckState::Checked);
        assert_eq!(tree.node(a).unwrap().size(), Some(100));
        assert_eq!(tree.node(live).unwrap().check_state(), CheckState::Partial);
        assert_eq!(tree.child_count(live).unwrap(), 2);
        assert_counters_hold(&tree, tree.root());
    }

    #[test]
    fn test_new_entry_is_appended_and_parent_rederived() {
        let mut tree = SelectionTree::new();
        let root = tree.root();
        tree.populate(
            root,
            &[Entry::directory("d", vec![Entry::file("a").ignored(false)]).ignored(false)],
        )
        .unwrap();
        let dir = tree.resolve("/d").unwrap();
        let log = EventLog::new();
        tree.subscribe(Box::new(log.clone()));

        let listing = vec![Entry::file("a").ignored(false), Entry::file("new")];
        let report = tree.reconcile(dir, listing).unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(tree.child_names(dir).unwrap(), vec!["a", "new"]);
        assert_eq!(tree.node(dir).unwrap().check_state(), CheckState::Partial);
        assert_eq!(
            log.events(),
            vec![
                TreeEvent::RowsAboutToBeInserted { parent: dir, first: 1, last: 1 },
                TreeEvent::RowsInserted { parent: dir, first: 1, last: 1 },
                TreeEvent::DataChanged { node: dir },
                TreeEvent::ChildrenChanged { parent: dir, count: 2 },
            ]
        );
    }

    #[test]
    fn test_fully_checked_parent_marks_matched_children() {
        let mut tree = SelectionTree::new();
        tree.populate(
            tree.root(),
            &[Entry::directory(
                "d",
                vec![Entry::file("a").ignored(false), Entry::file("b").ignored(false)],
            )
            .ignored(false)],
        )
        .unwrap();
        let dir = tree.resolve("/d").unwrap();

        let listing = vec![
            Entry::file("a").ignored(false),
            Entry::file("b").ignored(false),
            Entry::file("c"),
        ];
        tree.reconcile(dir, listing).unwrap();

        assert_eq!(tree.changed_paths(), vec!["/d/a", "/d/b"]);
        assert_eq!(tree.node(dir).unwrap().check_state(), CheckState::Partial);
    }

    #[test]
    fn test_renamed_entry_is_delete_plus_insert() {
        let (mut tree, music) = music_tree();
        let listing = music_listing()
            .into_iter()
            .map(|mut entry| {
                if entry.name.as_deref() == Some("a.ogg") {
                    entry.name = Some("z.ogg".into());
                }
                entry
            })
            .collect();

        let report = tree.reconcile(music, listing).unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(report.inserted, 1);
        assert_eq!(tree.child_names(music).unwrap(), vec!["b.ogg", "live", "z.ogg"]);
        assert_counters_hold(&tree, tree.root());
    }

    #[test]
    fn test_kind_change_replaces_node() {
        let (mut tree, music) = music_tree();
        let mut listing = music_listing();
        listing[1] = Entry::directory("b.ogg", vec![Entry::file("inner")]);

        let report = tree.reconcile(music, listing).unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(report.inserted, 2);
        let b = tree.resolve("/music/b.ogg").unwrap();
        assert!(tree.node(b).unwrap().is_directory());
        assert_eq!(tree.child_names(b).unwrap(), vec!["inner"]);
    }

    #[test]
    fn test_directory_with_new_child_count_is_rebuilt() {
        let (mut tree, music) = music_tree();
        let mut listing = music_listing();
        listing[2] = Entry::directory(
            "live",
            vec![
                Entry::file("c.ogg").ignored(false),
                Entry::file("d.ogg"),
                Entry::file("e.ogg").ignored(false),
            ],
        )
        .partial(true);

        let report = tree.reconcile(music, listing).unwrap();

        assert_eq!(report.rebuilt, 1);
        assert_eq!(report.inserted, 3);
        let live = tree.resolve("/music/live").unwrap();
        assert_eq!(tree.child_names(live).unwrap(), vec!["c.ogg", "d.ogg", "e.ogg"]);
        assert_eq!(tree.node(live).unwrap().checked_child_count(), 2);
        assert_counters_hold(&tree, tree.root());
    }

    #[test]
    fn test_entries_missing_required_fields_are_skipped() {
        let (mut tree, music) = music_tree();
        let mut listing = music_listing();
        listing.push(Entry::name_only("no-type"));
        listing.push(Entry::file("a.ogg"));

        let report = tree.reconcile(music, listing).unwrap();

        assert_eq!(report.skipped, 2);
        assert_eq!(report.matched, 3);
        assert_eq!(tree.child_count(music).unwrap(), 3);
    }

    #[test]
    fn test_sync_state_and_metadata_are_refreshed() {
        let (mut tree, music) = music_tree();
        let mut listing = music_listing();
        listing[0] = Entry::file("a.ogg")
            .ignored(false)
            .invalid(true)
            .size(0)
            .sync_state(SyncState::Conflict);

        tree.reconcile(music, listing).unwrap();

        let a = tree.node(tree.resolve("/music/a.ogg").unwrap()).unwrap();
        assert_eq!(a.sync_state(), SyncState::Conflict);
        assert!(a.is_invalid());
        assert_eq!(a.size(), None);
    }

    #[test]
    fn test_reconciling_a_file_is_type_mismatch() {
        let (mut tree, _) = music_tree();
        let a = tree.resolve("/music/a.ogg").unwrap();

        let result = tree.reconcile(a, Vec::new());

        assert!(matches!(result, Err(TreeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_listing_request_round_trips_without_rebuild() {
        let (mut tree, music) = music_tree();
        let mut request = tree.listing_request(music).unwrap();
        for entry in request.iter_mut() {
            entry.ignored = Some(true);
        }

        let report = tree.reconcile(music, request).unwrap();

        assert_eq!(report.rebuilt, 0);
        assert_eq!(report.matched, 3);
        let live = tree.resolve("/music/live").unwrap();
        assert_eq!(tree.child_count(live).unwrap(), 2);
        assert_eq!(tree.node(music).unwrap().check_state(), CheckState::Unchecked);
        assert_counters_hold(&tree, tree.root());
    }

    #[test]
    fn test_one_level_listing_keeps_loaded_subtree() {
        let (mut tree, music) = music_tree();
        let d = tree.resolve("/music/live/d.ogg").unwrap();
        tree.apply_selection(d, CheckState::Checked).unwrap();
        let mut listing = music_listing();
        listing[2].children = None;

        let report = tree.reconcile(music, listing).unwrap();

        assert_eq!(report.rebuilt, 0);
        let live = tree.resolve("/music/live").unwrap();
        assert_eq!(tree.child_names(live).unwrap(), vec!["c.ogg", "d.ogg"]);
        assert_eq!(tree.node(d).unwrap().check_state(), CheckState::Checked);
        assert!(tree.node(d).unwrap().is_changed());
        assert_counters_hold(&tree, tree.root());
    }

    #[test]
    fn test_bare_name_records_do_not_trigger_rebuild() {
        let (mut tree, music) = music_tree();
        let mut listing = music_listing();
        listing[2].children = Some(vec![Entry::name_only("c.ogg")]);

        let report = tree.reconcile(music, listing).unwrap();

        assert_eq!(report.rebuilt, 0);
        let live = tree.resolve("/music/live").unwrap();
        assert_eq!(tree.child_count(live).unwrap(), 2);
    }

    #[test]
    fn test_root_refresh_never_counts_as_fully_checked() {
        let listing = || vec![Entry::file("a").ignored(false), Entry::file("b").ignored(false)];
        let (mut tree, _) = SelectionTree::from_entries(&listing()).unwrap();
        let root = tree.root();
        tree.reconcile(root, listing()).unwrap();
        assert!(tree.changed_paths().is_empty());

        let a = tree.resolve("/a").unwrap();
        tree.apply_selection(a, CheckState::Unchecked).unwrap();
        tree.reconcile(root, vec![Entry::file("a"), Entry::file("b").ignored(false)])
            .unwrap();

        assert_eq!(tree.changed_paths(), vec!["/a"]);
        assert_eq!(tree.node(root).unwrap().checked_child_count(), 1);
        assert_eq!(tree.node(root).unwrap().check_state(), CheckState::Unchecked);
    }
}
