//! Wiring for the order event-sourcing core.
//!
//! Builds the command handler over an in-memory event store and runs a short
//! scripted session against it, with structured logging (tracing) and
//! Prometheus metrics installed by the binary.

pub mod config;
pub mod telemetry;

use common::AggregateId;
use domain::{DomainError, Order, OrderCommandHandler, OrderLine};
use event_store::InMemoryEventStore;

/// Builds a command handler over a fresh in-memory event store.
pub fn build_handler() -> OrderCommandHandler<InMemoryEventStore> {
    OrderCommandHandler::with_store(InMemoryEventStore::new())
}

/// Places and activates `order_id`, then reloads it from the store.
///
/// Returns the reloaded order, or None if nothing was recorded for it.
#[tracing::instrument(skip(handler, lines))]
pub async fn run_session(
    handler: &OrderCommandHandler<InMemoryEventStore>,
    order_id: &str,
    lines: Vec<OrderLine>,
) -> Result<Option<Order>, DomainError> {
    let placed = handler.place_order(order_id, lines).await?;
    tracing::info!(status = %placed.aggregate.status(), version = %placed.new_version, "order placed");

    let activated = handler.activate_order(order_id).await?;
    tracing::info!(status = %activated.aggregate.status(), version = %activated.new_version, "order activated");

    handler.get_order(&AggregateId::new(order_id)).await
}
