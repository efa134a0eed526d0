use snafu::Snafu;

use crate::tree::NodeId;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(display("Node '{}' is a file and cannot hold children", name))]
    TypeMismatch { name: String },
    #[snafu(display("Node reference {} does not belong to this tree", id))]
    InvalidReference { id: NodeId },
    #[snafu(display("Node '{}' is not listed among its parent's children", name))]
    BrokenLinkage { name: String },
    #[snafu(display("Node {} has no child at row {}", parent, row))]
    RowOutOfRange { parent: NodeId, row: usize },
    #[snafu(display("The tree root cannot be selected"))]
    RootNotSelectable,
    #[snafu(display("No node at path '{}'", path))]
    PathNotFound { path: String },
}
