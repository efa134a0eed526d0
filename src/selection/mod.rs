//! Selection and remote-relationship states carried by every tree node.
//!
//! Both enums are owned by the core; presentation layers translate them into
//! whatever widget or colour representation they need.

mod check_state;
mod sync_state;

pub use check_state::{CheckState, ParseCheckStateError};
pub use sync_state::SyncState;
