//! Domain error types.

use event_store::EventStoreError;
use thiserror::Error;

use crate::order::OrderError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// The order aggregate rejected a command.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// A stored event payload could not be decoded, or a new one encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
