use derive_more::Display;
use time::OffsetDateTime;

use crate::tree::{NodeId, SelectionTree, TreeError};

pub const COLUMN_HEADERS: [&str; 3] = ["Title", "Size", "Modified"];

/// Positional attribute of a node as shown by display collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ColumnValue {
    #[display("{_0}")]
    Text(String),
    #[display("{_0}")]
    Bytes(u64),
    #[display("{_0}")]
    Timestamp(OffsetDateTime),
}

impl SelectionTree {
    pub fn column_count(&self) -> usize {
        COLUMN_HEADERS.len()
    }

    pub fn header(&self, column: usize) -> Option<&'static str> {
        COLUMN_HEADERS.get(column).copied()
    }

    /// `None` for columns out of range and for absent metadata.
    pub fn column_value(&self, id: NodeId, column: usize) -> Result<Option<ColumnValue>, TreeError> {
        let node = self.node(id)?;
        Ok(match column {
            0 => Some(ColumnValue::Text(node.name().to_string())),
            1 => node.size().map(ColumnValue::Bytes),
            2 => node.modified().map(ColumnValue::Timestamp),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Entry, NodeAttributes};
    use crate::tree::Node;
    use time::macros::datetime;

    #[test]
    fn test_columns_expose_name_size_and_modified() {
        let mut tree = SelectionTree::new();
        let entry = Entry::file("a.txt")
            .size(42)
            .modified("2020-01-02T03:04:05Z");
        let id = tree
            .append_child(
                tree.root(),
                Node::file("a.txt").with_attributes(NodeAttributes::from(&entry)),
            )
            .unwrap();

        assert_eq!(tree.column_count(), 3);
        assert_eq!(
            tree.column_value(id, 0).unwrap(),
            Some(ColumnValue::Text("a.txt".into()))
        );
        assert_eq!(tree.column_value(id, 1).unwrap(), Some(ColumnValue::Bytes(42)));
        assert_eq!(
            tree.column_value(id, 2).unwrap(),
            Some(ColumnValue::Timestamp(datetime!(2020-01-02 03:04:05 UTC)))
        );
        assert_eq!(tree.column_value(id, 3).unwrap(), None);
    }

    #[test]
    fn test_absent_metadata_has_no_value() {
        let mut tree = SelectionTree::new();
        let id = tree.append_child(tree.root(), Node::directory("d")).unwrap();

        assert_eq!(tree.column_value(id, 1).unwrap(), None);
        assert_eq!(tree.column_value(id, 2).unwrap(), None);
    }

    #[test]
    fn test_headers() {
        let tree = SelectionTree::new();
        assert_eq!(tree.header(0), Some("Title"));
        assert_eq!(tree.header(2), Some("Modified"));
        assert_eq!(tree.header(3), None);
    }
}
