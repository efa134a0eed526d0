//! Turning snapshot records into nodes, and merging fresh listings into a
//! live tree.

mod materialize;
mod reconciler;

pub use materialize::MaterializeReport;
pub use reconciler::ReconcileReport;
