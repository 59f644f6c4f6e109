use thiserror::Error;

use crate::AggregateId;

/// Errors that can occur when interacting with the event store.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// No events have been recorded for the aggregate.
    ///
    /// An identifier with zero events is indistinguishable from an unknown one.
    #[error("Aggregate not found: {0}")]
    AggregateNotFound(AggregateId),

    /// An event in an append batch belongs to a different aggregate.
    #[error("Event for aggregate {found} cannot be appended to aggregate {expected}")]
    AggregateMismatch {
        expected: AggregateId,
        found: AggregateId,
    },

    /// An envelope was built without one of its required fields.
    #[error("Event envelope is missing {0}")]
    IncompleteEnvelope(&'static str),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;
