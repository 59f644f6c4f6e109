//! Repository mediating between aggregates and the event store.

use std::marker::PhantomData;

use common::AggregateId;
use event_store::{EventEnvelope, EventStore, EventStoreError, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::DomainError;

/// Loads aggregates by replaying their history and persists the events they
/// record.
///
/// The repository owns no aggregate state: durable state lives in the store,
/// and every loaded aggregate is a fresh projection of it.
pub struct Repository<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    store: S,
    _phantom: PhantomData<fn() -> A>,
}

impl<S, A> Clone for Repository<S, A>
where
    S: EventStore + Clone,
    A: Aggregate,
{
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

impl<S, A> Repository<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    /// Creates a new repository over the given event store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads an aggregate by replaying its stored history.
    ///
    /// An identifier with no history, or whose history holds only unrecognized
    /// event types, yields the default (empty) aggregate rather than an error. Use [`load_existing`](Self::load_existing) to
    /// tell the two apart.
    #[tracing::instrument(skip(self), fields(aggregate_type = A::aggregate_type()))]
    pub async fn load(&self, aggregate_id: &AggregateId) -> Result<A, DomainError> {
        let envelopes = match self.store.load(aggregate_id).await {
            Ok(envelopes) => envelopes,
            Err(EventStoreError::AggregateNotFound(_)) => {
                tracing::debug!("no history, returning empty aggregate");
                return Ok(A::default());
            }
            Err(e) => return Err(e.into()),
        };

        let version = envelopes
            .last()
            .map(|e| e.version)
            .unwrap_or(Version::initial());

        let mut events = Vec::with_capacity(envelopes.len());
        for envelope in envelopes {
            if !A::Event::is_known_type(&envelope.event_type) {
                tracing::debug!(event_type = %envelope.event_type, "skipping unrecognized event");
                continue;
            }
            events.push(serde_json::from_value::<A::Event>(envelope.payload)?);
        }

        if events.is_empty() {
            tracing::debug!("no recognized history, returning empty aggregate");
            return Ok(A::default());
        }

        let count = events.len();
        let mut aggregate = A::replay(events);
        aggregate.set_version(version);

        tracing::debug!(events = count, %version, "aggregate replayed");
        Ok(aggregate)
    }

    /// Loads an aggregate, returning None if it has no recognized history.
    pub async fn load_existing(&self, aggregate_id: &AggregateId) -> Result<Option<A>, DomainError> {
        let aggregate = self.load(aggregate_id).await?;
        if aggregate.id().is_empty() {
            Ok(None)
        } else {
            Ok(Some(aggregate))
        }
    }

    /// Persists the aggregate's uncommitted events.
    ///
    /// Appends exactly the events recorded since load, in the order they were
    /// recorded, then clears the buffer and takes the version the store
    /// assigned to the last event. Returns the persisted events. With nothing
    /// uncommitted the store is not touched. If the append fails the buffer is
    /// left intact.
    #[tracing::instrument(skip(self, aggregate), fields(aggregate_id = %aggregate.id()))]
    pub async fn save(&self, aggregate: &mut A) -> Result<Vec<A::Event>, DomainError> {
        if aggregate.uncommitted_events().is_empty() {
            return Ok(vec![]);
        }

        let aggregate_id = aggregate.id().clone();
        let envelopes = build_envelopes::<A>(&aggregate_id, aggregate.uncommitted_events())?;

        let new_version = self.store.append(&aggregate_id, envelopes).await?;

        aggregate.set_version(new_version);
        let events = aggregate.take_uncommitted_events();

        tracing::debug!(events = events.len(), %new_version, "aggregate saved");
        Ok(events)
    }
}

/// Wraps domain events in envelopes. Versions are assigned by the store.
fn build_envelopes<A: Aggregate>(
    aggregate_id: &AggregateId,
    events: &[A::Event],
) -> Result<Vec<EventEnvelope>, DomainError> {
    events
        .iter()
        .map(|event| {
            Ok(EventEnvelope::builder()
                .aggregate_id(aggregate_id.clone())
                .aggregate_type(A::aggregate_type())
                .event_type(event.event_type())
                .payload(event)?
                .build()?)
        })
        .collect()
}
