//! The selection tree: nodes with tri-state check states, upward propagation
//! of user edits, the change tracker and the path list queries.

mod change_tracker;
mod columns;
mod error;
mod export;
mod node;
mod paths;
mod propagation;
mod selection_tree;

pub use change_tracker::ChangeTracker;
pub use columns::{COLUMN_HEADERS, ColumnValue};
pub use error::TreeError;
pub use export::NodeSummary;
pub use node::{Node, NodeId};
pub use selection_tree::SelectionTree;
