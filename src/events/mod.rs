//! Change notifications for display collaborators.
//!
//! The tree reports every structural mutation as a begin/end bracket and every
//! state change as a data-changed signal. Events raised while a mutation pass
//! is running are held back and delivered, in order, once the pass completes.

mod event;
mod notifier;
mod observer;

pub use event::TreeEvent;
pub use notifier::Notifier;
pub use observer::{EventLog, TracingObserver, TreeObserver};
