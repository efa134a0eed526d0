use hashlink::LinkedHashSet;

/// Absolute paths touched during the current edit session, in first-touch order.
///
/// Paths are never removed: a node whose state returns to its baseline stays listed.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    paths: LinkedHashSet<String>,
}

impl ChangeTracker {
    /// Returns false when the path was already tracked.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.paths.contains(&path) {
            return false;
        }
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.paths.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_touch_order() {
        let mut tracker = ChangeTracker::default();

        assert!(tracker.insert("/b"));
        assert!(tracker.insert("/a"));
        assert!(!tracker.insert("/b"));

        assert_eq!(tracker.to_vec(), vec!["/b", "/a"]);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_reinsert_does_not_move_path_to_the_back() {
        let mut tracker = ChangeTracker::default();
        tracker.insert("/x");
        tracker.insert("/y");
        tracker.insert("/x");

        assert_eq!(tracker.iter().collect::<Vec<_>>(), vec!["/x", "/y"]);
        assert!(tracker.contains("/x"));
        assert!(!tracker.contains("/z"));
    }
}
