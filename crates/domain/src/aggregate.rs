//! Core aggregate and domain event traits.

use common::AggregateId;
use event_store::Version;
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened to exactly one aggregate.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    ///
    /// This is used for serialization and event store filtering.
    fn event_type(&self) -> &'static str;

    /// Returns the identifier of the aggregate this event belongs to.
    fn aggregate_id(&self) -> &AggregateId;

    /// Returns true if `event_type` names a variant of this event type.
    ///
    /// Stored events of any other type are skipped during replay.
    fn is_known_type(event_type: &str) -> bool;
}

/// Trait for aggregates in an event-sourced system.
///
/// An aggregate's state is a pure fold over its event history:
/// - Operations validate intent and record new events through [`apply`](Self::apply)
/// - Replay feeds stored events through the same [`apply`](Self::apply)
/// - Events recorded since the last load or save are buffered as uncommitted
pub trait Aggregate: Default + Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The type of errors this aggregate's operations can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    ///
    /// Used for event store organization and routing.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's identifier.
    ///
    /// Empty until the first event has been applied.
    fn id(&self) -> &AggregateId;

    /// Returns the version of the last persisted event.
    ///
    /// Version starts at 0 for a new aggregate.
    fn version(&self) -> Version;

    /// Sets the aggregate version.
    ///
    /// Called by the repository after loading or saving events.
    fn set_version(&mut self, version: Version);

    /// Applies an event to the aggregate, updating its state.
    ///
    /// This is the only routine allowed to change state. It must be pure and
    /// deterministic, and must not fail: events are facts that already happened.
    /// It does not touch the uncommitted buffer.
    fn apply(&mut self, event: &Self::Event);

    /// Returns the events recorded since the aggregate was loaded or last saved.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drains the uncommitted buffer.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;

    /// Rebuilds an aggregate by applying `events` in order to the default state.
    ///
    /// The result carries no uncommitted events.
    fn replay(events: impl IntoIterator<Item = Self::Event>) -> Self {
        let mut aggregate = Self::default();
        for event in events {
            aggregate.apply(&event);
        }
        aggregate
    }
}
