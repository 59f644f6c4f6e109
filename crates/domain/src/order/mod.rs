//! Order aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod handler;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use commands::{ActivateOrder, OrderCommand, PlaceOrder};
pub use events::{ActivatedData, OrderEvent, PlacedData};
pub use handler::OrderCommandHandler;
pub use state::OrderStatus;
pub use value_objects::{OrderLine, ProductId};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order already has an identifier, so it was placed before.
    #[error("Order has already been placed")]
    AlreadyPlaced,

    /// The order has no lines.
    #[error("Order has no lines")]
    EmptyOrderLine,

    /// No order ID was supplied.
    #[error("Order ID is required")]
    OrderIdRequired,
}
