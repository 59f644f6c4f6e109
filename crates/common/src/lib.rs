//! Shared types for the order event-sourcing core.

mod types;

pub use types::AggregateId;
