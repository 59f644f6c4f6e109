use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    AggregateId, EventEnvelope, EventStoreError, Result, Version,
    store::{EventStore, validate_events_for_append},
};

/// In-memory event store implementation.
///
/// Keeps every event in one unbounded sequence and filters by aggregate on
/// load. Appended envelopes are numbered after the aggregate's last stored
/// version, whatever version they carried. Appends take the write lock for the whole batch, so a concurrent
/// load never observes a partially appended batch. Clones share the same log.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all events.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(
        &self,
        aggregate_id: &AggregateId,
        mut events: Vec<EventEnvelope>,
    ) -> Result<Version> {
        validate_events_for_append(aggregate_id, &events)?;

        let mut store = self.events.write().await;

        // Current version for this aggregate
        let current_version = store
            .iter()
            .filter(|e| &e.aggregate_id == aggregate_id)
            .map(|e| e.version)
            .max()
            .unwrap_or(Version::initial());

        if events.is_empty() {
            return Ok(current_version);
        }

        let mut version = current_version;
        for event in &mut events {
            version = version.next();
            event.version = version;
        }

        let count = events.len();
        store.extend(events);

        metrics::counter!("events_appended_total").increment(count as u64);
        tracing::debug!(%aggregate_id, count, %version, "appended events");

        Ok(version)
    }

    async fn load(&self, aggregate_id: &AggregateId) -> Result<Vec<EventEnvelope>> {
        let store = self.events.read().await;
        let events: Vec<_> = store
            .iter()
            .filter(|e| &e.aggregate_id == aggregate_id)
            .cloned()
            .collect();

        if events.is_empty() {
            return Err(EventStoreError::AggregateNotFound(aggregate_id.clone()));
        }

        Ok(events)
    }

    async fn event_count(&self) -> Result<usize> {
        Ok(self.events.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventStoreExt;

    fn create_test_event(aggregate_id: &str, version: i64, event_type: &str) -> EventEnvelope {
        EventEnvelope::builder()
            .aggregate_id(aggregate_id)
            .aggregate_type("Order")
            .event_type(event_type)
            .version(Version::new(version))
            .payload_raw(serde_json::json!({"order_id": aggregate_id}))
            .build()
            .unwrap()
    }

    fn event_types(events: &[EventEnvelope]) -> Vec<&str> {
        events.iter().map(|e| e.event_type.as_str()).collect()
    }

    #[tokio::test]
    async fn append_then_load_single_event() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("ABC123");

        store
            .append(&id, vec![create_test_event("ABC123", 1, "OrderPlaced")])
            .await
            .unwrap();

        let events = store.load(&id).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, id);
    }

    #[tokio::test]
    async fn load_returns_prior_history_followed_by_new_batch() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("ABC123");

        store
            .append(&id, vec![create_test_event("ABC123", 1, "E1")])
            .await
            .unwrap();
        store
            .append(
                &id,
                vec![
                    create_test_event("ABC123", 2, "E2"),
                    create_test_event("ABC123", 3, "E3"),
                ],
            )
            .await
            .unwrap();

        let events = store.load(&id).await.unwrap();
        assert_eq!(event_types(&events), vec!["E1", "E2", "E3"]);
    }

    #[tokio::test]
    async fn append_renumbers_versions_after_stored_history() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("Y");

        let first = store
            .append(
                &id,
                vec![create_test_event("Y", 5, "Later"), create_test_event("Y", 1, "Earlier")],
            )
            .await
            .unwrap();
        // A writer that started from an empty aggregate still lands after the history.
        let second = store
            .append(&id, vec![create_test_event("Y", 1, "Again")])
            .await
            .unwrap();

        assert_eq!(first, Version::new(2));
        assert_eq!(second, Version::new(3));

        let events = store.load(&id).await.unwrap();
        assert_eq!(event_types(&events), vec!["Later", "Earlier", "Again"]);
        let versions: Vec<i64> = events.iter().map(|e| e.version.as_i64()).collect();
        assert_eq!(versions, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn versions_are_numbered_per_aggregate() {
        let store = InMemoryEventStore::new();
        let a = AggregateId::new("A");
        let b = AggregateId::new("B");

        store.append(&a, vec![create_test_event("A", 1, "E1")]).await.unwrap();
        let b_version = store
            .append(&b, vec![create_test_event("B", 1, "E1")])
            .await
            .unwrap();
        let a_version = store
            .append(&a, vec![create_test_event("A", 1, "E2")])
            .await
            .unwrap();

        assert_eq!(b_version, Version::first());
        assert_eq!(a_version, Version::new(2));
    }

    #[tokio::test]
    async fn load_unknown_aggregate_is_not_found() {
        let store = InMemoryEventStore::new();

        let result = store.load(&AggregateId::new("UNKNOWN")).await;
        assert!(matches!(
            result,
            Err(EventStoreError::AggregateNotFound(id)) if id.as_str() == "UNKNOWN"
        ));
    }

    #[tokio::test]
    async fn append_empty_batch_is_noop() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("X");

        let version = store.append(&id, vec![]).await.unwrap();

        assert_eq!(version, Version::initial());
        assert_eq!(store.event_count().await.unwrap(), 0);
        assert!(matches!(
            store.load(&id).await,
            Err(EventStoreError::AggregateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn append_never_deduplicates() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("A");
        let event = create_test_event("A", 1, "OrderPlaced");

        store.append(&id, vec![event.clone()]).await.unwrap();
        store.append(&id, vec![event]).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn append_with_foreign_event_appends_nothing() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("A");

        let result = store
            .append(
                &id,
                vec![create_test_event("A", 1, "E1"), create_test_event("B", 1, "E1")],
            )
            .await;

        assert!(matches!(
            result,
            Err(EventStoreError::AggregateMismatch { .. })
        ));
        assert_eq!(store.event_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn aggregates_are_isolated() {
        let store = InMemoryEventStore::new();
        let a = AggregateId::new("A");
        let b = AggregateId::new("B");

        store
            .append(&a, vec![create_test_event("A", 1, "OrderPlaced")])
            .await
            .unwrap();
        store
            .append(&b, vec![create_test_event("B", 1, "OrderPlaced")])
            .await
            .unwrap();
        store
            .append(&a, vec![create_test_event("A", 2, "OrderActivated")])
            .await
            .unwrap();

        let a_events = store.load(&a).await.unwrap();
        let b_events = store.load(&b).await.unwrap();
        assert_eq!(event_types(&a_events), vec!["OrderPlaced", "OrderActivated"]);
        assert_eq!(event_types(&b_events), vec!["OrderPlaced"]);
        assert_eq!(store.event_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn clones_share_the_same_log() {
        let store = InMemoryEventStore::new();
        let clone = store.clone();
        let id = AggregateId::new("A");

        clone
            .append(&id, vec![create_test_event("A", 1, "OrderPlaced")])
            .await
            .unwrap();

        assert_eq!(store.load(&id).await.unwrap().len(), 1);

        store.clear().await;
        assert_eq!(clone.event_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ext_helpers() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("A");

        assert!(!store.aggregate_exists(&id).await.unwrap());

        store
            .append_event(create_test_event("A", 1, "OrderPlaced"))
            .await
            .unwrap();

        assert!(store.aggregate_exists(&id).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_batches_are_never_interleaved() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new("A");

        let mut handles = Vec::new();
        for writer in 0..8 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let batch = (0..10)
                    .map(|i| create_test_event("A", i + 1, &format!("w{writer}")))
                    .collect();
                store.append(&id, batch).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let events = store.load(&id).await.unwrap();
        assert_eq!(events.len(), 80);
        for chunk in events.chunks(10) {
            let writer = &chunk[0].event_type;
            assert!(chunk.iter().all(|e| &e.event_type == writer));
        }
        let versions: Vec<i64> = events.iter().map(|e| e.version.as_i64()).collect();
        assert_eq!(versions, (1..=80).collect::<Vec<_>>());
    }
}
