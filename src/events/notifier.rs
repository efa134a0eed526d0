use crate::events::{TreeEvent, TreeObserver};

/// Fans events out to subscribed observers.
///
/// While at least one [`hold`](Notifier::hold) is outstanding, events are
/// queued; the matching [`release`](Notifier::release) delivers the queue.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Box<dyn TreeObserver>>,
    pending: Vec<TreeEvent>,
    holds: usize,
}

impl Notifier {
    pub fn subscribe(&mut self, observer: Box<dyn TreeObserver>) {
        self.observers.push(observer);
    }

    pub fn emit(&mut self, event: TreeEvent) {
        if self.holds > 0 {
            self.pending.push(event);
        } else {
            self.dispatch(&event);
        }
    }

    pub fn hold(&mut self) {
        self.holds += 1;
    }

    pub fn release(&mut self) {
        self.holds = self.holds.saturating_sub(1);
        if self.holds == 0 {
            for event in std::mem::take(&mut self.pending) {
                self.dispatch(&event);
            }
        }
    }

    fn dispatch(&mut self, event: &TreeEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .field("pending", &self.pending)
            .field("holds", &self.holds)
            .finish()
    }
}
