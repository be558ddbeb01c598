//! Notification seams between the interaction controller and its collaborators

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

/// Told whenever the gizmo gains or loses a bound, visible object
pub trait ManipulationObserver {
    fn set_manipulation_active(&self, active: bool);
}

/// Camera controls that must stop orbiting while the gizmo is dragged
pub trait OrbitToggle {
    fn set_enabled(&self, enabled: bool);
}

/// Shared boolean that records the last manipulation-active notification
#[derive(Debug, Clone, Default)]
pub struct ManipulationFlag(Arc<AtomicBool>);

impl ManipulationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl ManipulationObserver for ManipulationFlag {
    fn set_manipulation_active(&self, active: bool) {
        self.0.store(active, Ordering::Relaxed);
    }
}

/// Handle returned by [`SelectionEvents::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Selection-changed callback: the newly selected object, or `None`
pub type SelectionCallback = Box<dyn FnMut(Option<Uuid>)>;

/// Multi-subscriber selection-changed emitter
#[derive(Default)]
pub struct SelectionEvents {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, SelectionCallback)>,
}

impl SelectionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, invoked in subscription order
    pub fn subscribe(&mut self, callback: impl FnMut(Option<Uuid>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, selected: Option<Uuid>) {
        for (_, callback) in &mut self.subscribers {
            callback(selected);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for SelectionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEvents")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
