//! Tokio broadcast event bus for barillet change notifications.

use crate::models::BarilletEvent;
use tokio::sync::broadcast;

/// Default number of events buffered per receiver.
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 256;

type Predicate = Box<dyn Fn(&BarilletEvent) -> bool + Send + Sync>;

/// Central event bus for broadcasting barillet events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BarilletEvent>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUS_CAPACITY)
    }
}

/// Receiver that yields only events matching a predicate.
pub struct FilteredReceiver {
    receiver: broadcast::Receiver<BarilletEvent>,
    predicate: Predicate,
}

impl EventBus {
    /// Creates a new event bus with the given buffer capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers (best effort).
    #[allow(clippy::cast_precision_loss)]
    pub fn publish(&self, event: BarilletEvent) {
        metrics::counter!("event_bus_publish_total", "event_type" => event.event_type())
            .increment(1);
        metrics::gauge!("event_bus_receivers").set(self.sender.receiver_count() as f64);
        if self.sender.send(event).is_err() {
            // No live receivers.
            metrics::counter!("event_bus_publish_dropped_total").increment(1);
        }
    }

    /// Subscribes with a predicate on events.
    #[must_use]
    pub fn subscribe_filtered<F>(&self, predicate: F) -> FilteredReceiver
    where
        F: Fn(&BarilletEvent) -> bool + Send + Sync + 'static,
    {
        metrics::counter!("event_bus_subscriptions_total").increment(1);
        FilteredReceiver {
            receiver: self.sender.subscribe(),
            predicate: Box::new(predicate),
        }
    }

    /// Subscribes to events about barillets owned by `user_id`.
    #[must_use]
    pub fn subscribe_owner(&self, user_id: impl Into<String>) -> FilteredReceiver {
        let user_id = user_id.into();
        self.subscribe_filtered(move |event| event.user_id() == user_id)
    }

    /// Subscribes to events about one barillet.
    #[must_use]
    pub fn subscribe_barillet(&self, id: crate::models::BarilletId) -> FilteredReceiver {
        self.subscribe_filtered(move |event| *event.barillet_id() == id)
    }

    /// Returns the number of live receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl FilteredReceiver {
    /// Waits for the next matching event.
    ///
    /// Returns `Ok(None)` when events were dropped because this receiver
    /// fell behind; the caller should treat it as "something changed".
    ///
    /// # Errors
    ///
    /// Returns [`broadcast::error::RecvError::Closed`] once every sender is
    /// gone.
    pub async fn recv(&mut self) -> Result<Option<BarilletEvent>, broadcast::error::RecvError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if (self.predicate)(&event) => return Ok(Some(event)),
                Ok(_) => {},
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    metrics::counter!("event_bus_lagged_total").increment(skipped);
                    return Ok(None);
                },
                Err(err) => return Err(err),
            }
        }
    }
}
