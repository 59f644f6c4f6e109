use async_trait::async_trait;

use crate::{AggregateId, EventEnvelope, EventStoreError, Result, Version};

/// Core trait for event store implementations.
///
/// An event store is an append-only log keyed by aggregate identifier. It is
/// the seam at which a durable backend would be substituted; any backend must
/// keep the two contracts below, since replay depends on exact order.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends events to the tail of the log for `aggregate_id`.
    ///
    /// Order is preserved and the batch is appended atomically. The store
    /// numbers the envelopes consecutively after the aggregate's last stored
    /// version and returns the version of the last one. An empty batch is a
    /// no-op returning the current version. Events are never deduplicated and
    /// the versions they carry are not checked. Every envelope must belong to
    /// `aggregate_id`, otherwise the batch fails with `AggregateMismatch` and
    /// nothing is appended.
    async fn append(
        &self,
        aggregate_id: &AggregateId,
        events: Vec<EventEnvelope>,
    ) -> Result<Version>;

    /// Returns the full event history for `aggregate_id` in append order.
    ///
    /// Fails with `AggregateNotFound` when no events exist for the identifier.
    async fn load(&self, aggregate_id: &AggregateId) -> Result<Vec<EventEnvelope>>;

    /// Returns the total number of events stored across all aggregates.
    async fn event_count(&self) -> Result<usize>;
}

/// Extension trait providing convenience methods for event stores.
#[async_trait]
pub trait EventStoreExt: EventStore {
    /// Appends a single event to the store under its own aggregate ID.
    async fn append_event(&self, event: EventEnvelope) -> Result<Version> {
        let aggregate_id = event.aggregate_id.clone();
        self.append(&aggregate_id, vec![event]).await
    }

    /// Checks if an aggregate exists (has any events).
    async fn aggregate_exists(&self, aggregate_id: &AggregateId) -> Result<bool> {
        match self.load(aggregate_id).await {
            Ok(_) => Ok(true),
            Err(EventStoreError::AggregateNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// Blanket implementation for all EventStore implementations
impl<T: EventStore + ?Sized> EventStoreExt for T {}

/// Validates that every event in a batch belongs to `aggregate_id`.
pub fn validate_events_for_append(
    aggregate_id: &AggregateId,
    events: &[EventEnvelope],
) -> Result<()> {
    if let Some(foreign) = events.iter().find(|e| &e.aggregate_id != aggregate_id) {
        return Err(EventStoreError::AggregateMismatch {
            expected: aggregate_id.clone(),
            found: foreign.aggregate_id.clone(),
        });
    }

    Ok(())
}
