use std::cell::RefCell;
use std::rc::Rc;

use kuchiki::NodeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    /// The node the event was fired on.
    pub target: NodeRef,
    /// The node whose listener is currently running.
    pub current_target: NodeRef,
}

pub type Listener = Rc<dyn Fn(&Event)>;

/// Listener registry with bubbling dispatch.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<(NodeRef, EventKind, Listener)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, target: &NodeRef, kind: EventKind, listener: Listener) {
        self.listeners
            .borrow_mut()
            .push((target.clone(), kind, listener));
    }

    pub fn listener_count(&self, target: &NodeRef, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(node, k, _)| node == target && *k == kind)
            .count()
    }

    /// Fires `kind` at `target`, then at each ancestor in turn. Returns the
    /// number of listeners invoked.
    pub fn dispatch(&self, target: &NodeRef, kind: EventKind) -> usize {
        let mut invoked = 0;
        for node in target.inclusive_ancestors() {
            // Snapshot so listeners may register further listeners.
            let matching: Vec<Listener> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(n, k, _)| *n == node && *k == kind)
                .map(|(_, _, l)| l.clone())
                .collect();
            if matching.is_empty() {
                continue;
            }
            let event = Event {
                kind,
                target: target.clone(),
                current_target: node.clone(),
            };
            for listener in matching {
                listener(&event);
                invoked += 1;
            }
        }
        tracing::trace!(event = kind.name(), invoked, "dispatched");
        invoked
    }
}
