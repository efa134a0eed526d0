//! Boundary records handed over by the remote listing service.
//!
//! A snapshot is a list of nested [`Entry`] records. Everything optional in a
//! record is defaulted when it is mapped onto a node (see [`NodeAttributes`]),
//! so partial remote data never aborts a build or a reconciliation pass.

mod attributes;
mod entry;
mod snapshot;

pub use attributes::NodeAttributes;
pub use entry::{Entry, EntryKind};
pub use snapshot::{Snapshot, SnapshotError};
