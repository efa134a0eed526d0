use crate::selection::CheckState;
use crate::tree::{NodeId, SelectionTree};

impl SelectionTree {
    /// Absolute paths of every node in `state`, depth first, parents before children.
    ///
    /// When collecting checked paths, a checked node stands for its whole
    /// subtree and is not descended into.
    pub fn paths_by_state(&self, state: CheckState) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths(self.root(), "/", state, &mut paths);
        paths
    }

    fn collect_paths(&self, parent: NodeId, prefix: &str, state: CheckState, paths: &mut Vec<String>) {
        let Ok(children) = self.children(parent) else {
            return;
        };

        for child in children {
            let Ok(node) = self.node(*child) else {
                continue;
            };
            if self.is_reserved(parent, node.name()) {
                continue;
            }

            let path = format!("{}{}", prefix, node.name());
            if node.check_state() == state {
                paths.push(path.clone());
            }

            let descend = state != CheckState::Checked
                || (node.check_state() != CheckState::Checked && node.child_count() > 0);
            if descend {
                self.collect_paths(*child, &format!("{}/", path), state, paths);
            }
        }
    }

    /// Every path touched during the edit session, in first-touch order.
    pub fn changed_paths(&self) -> Vec<String> {
        self.changes.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionConfig;
    use crate::tree::Node;

    #[test]
    fn test_checked_query_does_not_descend_into_checked_nodes() {
        let mut tree = SelectionTree::new();
        let root = tree.root();
        let folder_a = tree
            .append_child(root, Node::directory("folderA").with_check_state(CheckState::Checked))
            .unwrap();
        tree.append_child(root, Node::directory("folderB")).unwrap();

        assert_eq!(tree.paths_by_state(CheckState::Checked), vec!["/folderA"]);

        tree.append_child(folder_a, Node::file("inner").with_check_state(CheckState::Checked))
            .unwrap();
        assert_eq!(tree.paths_by_state(CheckState::Checked), vec!["/folderA"]);
    }

    #[test]
    fn test_checked_query_descends_through_two_partial_levels() {
        let mut tree = SelectionTree::new();
        let root = tree.root();
        let top = tree
            .append_child(root, Node::directory("top").with_check_state(CheckState::Partial))
            .unwrap();
        let mid = tree
            .append_child(top, Node::directory("mid").with_check_state(CheckState::Partial))
            .unwrap();
        let leaf_dir = tree
            .append_child(mid, Node::directory("deep").with_check_state(CheckState::Checked))
            .unwrap();
        tree.append_child(leaf_dir, Node::file("x").with_check_state(CheckState::Checked))
            .unwrap();
        tree.append_child(mid, Node::file("off")).unwrap();
        tree.append_child(top, Node::file("on").with_check_state(CheckState::Checked))
            .unwrap();

        assert_eq!(
            tree.paths_by_state(CheckState::Checked),
            vec!["/top/mid/deep", "/top/on"]
        );
        assert_eq!(
            tree.paths_by_state(CheckState::Partial),
            vec!["/top", "/top/mid"]
        );
    }

    #[test]
    fn test_unchecked_query_descends_everywhere() {
        let mut tree = SelectionTree::new();
        let root = tree.root();
        let checked = tree
            .append_child(root, Node::directory("kept").with_check_state(CheckState::Checked))
            .unwrap();
        tree.append_child(checked, Node::file("stale")).unwrap();
        tree.append_child(root, Node::file("skipped")).unwrap();

        assert_eq!(
            tree.paths_by_state(CheckState::Unchecked),
            vec!["/kept/stale", "/skipped"]
        );
    }

    #[test]
    fn test_reserved_top_level_name_is_never_listed() {
        let mut tree = SelectionTree::with_config(&SelectionConfig::default());
        let root = tree.root();
        tree.append_child(root, Node::file(".stignoreglobal")).unwrap();
        let dir = tree.append_child(root, Node::directory("d")).unwrap();
        tree.append_child(dir, Node::file(".stignoreglobal")).unwrap();

        assert_eq!(
            tree.paths_by_state(CheckState::Unchecked),
            vec!["/d", "/d/.stignoreglobal"]
        );
    }

    #[test]
    fn test_empty_tree_lists_nothing() {
        let tree = SelectionTree::new();
        assert!(tree.paths_by_state(CheckState::Checked).is_empty());
        assert!(tree.changed_paths().is_empty());
    }
}
