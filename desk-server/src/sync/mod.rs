//! Realtime change feed
//!
//! Every committed mutation publishes a [`SyncEvent`] that connected desk
//! clients receive over a WebSocket. Events are signals to refetch, not
//! deltas. Booking events are debounced so a burst of calendar edits
//! collapses into one refetch per booking.

mod ws;

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::broadcast;

use shared::sync::{SyncAction, SyncEvent};

pub use ws::router;

/// Broadcast channel capacity; slow consumers skip ahead on lag
const CHANNEL_CAPACITY: usize = 256;

/// Debounce window for booking events
const BOOKING_DEBOUNCE: Duration = Duration::from_millis(500);

/// In-process event bus with per-resource version counters
pub struct SyncBus {
    tx: broadcast::Sender<SyncEvent>,
    versions: DashMap<String, u64>,
    /// Latest pending booking event per booking id, awaiting flush
    pending_bookings: Mutex<HashMap<String, SyncEvent>>,
    flush_scheduled: AtomicBool,
}

impl SyncBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            versions: DashMap::new(),
            pending_bookings: Mutex::new(HashMap::new()),
            flush_scheduled: AtomicBool::new(false),
        }
    }

    /// Subscribe to the change feed
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    /// Current version of a resource (0 when it never changed)
    pub fn version(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }

    /// Publish a change
    ///
    /// Booking events are held back for [`BOOKING_DEBOUNCE`] and collapsed
    /// per booking id, keeping the latest payload. Everything else goes out
    /// immediately. Must be called from within a tokio runtime.
    pub fn publish(
        self: &std::sync::Arc<Self>,
        resource: &str,
        action: SyncAction,
        id: &str,
        data: Option<serde_json::Value>,
    ) {
        let version = {
            let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        let event = SyncEvent {
            resource: resource.to_string(),
            version,
            action,
            id: id.to_string(),
            data,
        };

        if resource != "booking" {
            let _ = self.tx.send(event);
            return;
        }

        if let Ok(mut pending) = self.pending_bookings.lock() {
            pending.insert(event.id.clone(), event);
        }
        if !self.flush_scheduled.swap(true, Ordering::AcqRel) {
            let bus = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(BOOKING_DEBOUNCE).await;
                bus.flush_bookings();
            });
        }
    }

    fn flush_bookings(&self) {
        self.flush_scheduled.store(false, Ordering::Release);
        let drained: Vec<SyncEvent> = match self.pending_bookings.lock() {
            Ok(mut pending) => pending.drain().map(|(_, e)| e).collect(),
            Err(_) => return,
        };
        for event in drained {
            let _ = self.tx.send(event);
        }
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_non_booking_events_flush_immediately() {
        let bus = Arc::new(SyncBus::new());
        let mut rx = bus.subscribe();
        bus.publish("room", SyncAction::Created, "r1", None);
        let event = rx.recv().await.unwrap();
        assert_eq!(event.resource, "room");
        assert_eq!(event.version, 1);
        assert_eq!(event.id, "r1");
    }

    #[tokio::test]
    async fn test_versions_are_per_resource() {
        let bus = Arc::new(SyncBus::new());
        let mut rx = bus.subscribe();
        bus.publish("room", SyncAction::Updated, "r1", None);
        bus.publish("room_deposit", SyncAction::Created, "d1", None);
        bus.publish("room", SyncAction::Updated, "r1", None);

        assert_eq!(rx.recv().await.unwrap().version, 1);
        assert_eq!(rx.recv().await.unwrap().version, 1);
        assert_eq!(rx.recv().await.unwrap().version, 2);
        assert_eq!(bus.version("room"), 2);
        assert_eq!(bus.version("booking"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_burst_collapses_to_latest() {
        let bus = Arc::new(SyncBus::new());
        let mut rx = bus.subscribe();

        bus.publish("booking", SyncAction::Updated, "b1", None);
        bus.publish("booking", SyncAction::Updated, "b1", None);
        bus.publish("booking", SyncAction::Updated, "b1", None);

        tokio::time::sleep(BOOKING_DEBOUNCE * 2).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.id, "b1");
        assert_eq!(event.version, 3);
        // only the collapsed event arrives
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_bookings_each_flush() {
        let bus = Arc::new(SyncBus::new());
        let mut rx = bus.subscribe();

        bus.publish("booking", SyncAction::Updated, "b1", None);
        bus.publish("booking", SyncAction::Created, "b2", None);

        tokio::time::sleep(BOOKING_DEBOUNCE * 2).await;

        let mut ids = vec![rx.recv().await.unwrap().id, rx.recv().await.unwrap().id];
        ids.sort();
        assert_eq!(ids, ["b1", "b2"]);
    }
}
