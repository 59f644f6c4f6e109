//! Domain layer for the order event-sourcing core.
//!
//! This crate provides:
//! - Aggregate trait for event-sourced entities
//! - DomainEvent trait for domain events
//! - Repository for the load-mutate-save cycle over an event store
//! - Command trait and the order command handler
//! - Order aggregate implementation with its status state machine

pub mod aggregate;
pub mod command;
pub mod error;
pub mod order;
pub mod repository;

pub use aggregate::{Aggregate, DomainEvent};
pub use command::{Command, CommandResult};
pub use error::DomainError;
pub use order::{
    ActivateOrder, Order, OrderCommand, OrderCommandHandler, OrderError, OrderEvent, OrderLine,
    OrderStatus, PlaceOrder, ProductId,
};
pub use repository::Repository;
