//! Behavior change notifications.

use std::cell::RefCell;
use std::rc::Rc;

/// Callbacks invoked by the [`Controller`](crate::Controller).
///
/// Notifications are delivered after the new tree is active.
pub trait BehaviorObserver {
    fn on_behavior_change(&mut self, previous: &str, name: &str);
}

/// A [`BehaviorObserver`] that reports changes through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl BehaviorObserver for LoggingObserver {
    fn on_behavior_change(&mut self, previous: &str, name: &str) {
        tracing::info!(previous, name, "Behavior changed");
    }
}

/// Records every change. Clones share one list, so a clone kept outside the
/// controller sees what the registered one received.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    changes: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> Vec<(String, String)> {
        self.changes.borrow().clone()
    }
}

impl BehaviorObserver for RecordingObserver {
    fn on_behavior_change(&mut self, previous: &str, name: &str) {
        self.changes
            .borrow_mut()
            .push((previous.to_owned(), name.to_owned()));
    }
}
