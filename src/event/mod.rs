mod bus;
mod events;

pub use bus::{EventBus, SubscriptionId};
pub use events::EditorEvent;

/// Receives every event emitted on an [`EventBus`].
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F: FnMut(&EditorEvent)> EventHandler for F {
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}
