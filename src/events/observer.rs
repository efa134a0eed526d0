use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::events::TreeEvent;

pub trait TreeObserver {
    fn on_event(&mut self, event: &TreeEvent);
}

/// Logs every event at debug level.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TreeObserver for TracingObserver {
    fn on_event(&mut self, event: &TreeEvent) {
        debug!("Tree event: {:?}", event);
    }
}

/// Records events into a shared buffer that stays readable after the
/// observer has been handed to a tree.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<TreeEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TreeEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl TreeObserver for EventLog {
    fn on_event(&mut self, event: &TreeEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
