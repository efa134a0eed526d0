//! Tri-state selection tree over a remote folder listing.
//!
//! A [`tree::SelectionTree`] is built from a [`snapshot::Snapshot`], edited by
//! the user through [`tree::SelectionTree::apply_selection`] and kept current
//! with fresh listings through [`tree::SelectionTree::reconcile`].

pub mod config;
pub mod events;
pub mod reconcile;
pub mod selection;
pub mod snapshot;
pub mod tree;
