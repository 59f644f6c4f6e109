//! Order commands.

use common::AggregateId;

use crate::command::Command;

use super::{Order, OrderLine};

/// Command to place a new order.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    /// The order ID to place the order under.
    pub order_id: AggregateId,

    /// The lines of the order.
    pub lines: Vec<OrderLine>,
}

impl PlaceOrder {
    /// Creates a new PlaceOrder command.
    pub fn new(order_id: impl Into<AggregateId>, lines: Vec<OrderLine>) -> Self {
        Self {
            order_id: order_id.into(),
            lines,
        }
    }
}

impl Command for PlaceOrder {
    type Aggregate = Order;

    fn aggregate_id(&self) -> &AggregateId {
        &self.order_id
    }

    fn name(&self) -> &'static str {
        "place_order"
    }
}

/// Command to activate a placed order.
#[derive(Debug, Clone)]
pub struct ActivateOrder {
    /// The order to activate.
    pub order_id: AggregateId,
}

impl ActivateOrder {
    /// Creates a new ActivateOrder command.
    pub fn new(order_id: impl Into<AggregateId>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }
}

impl Command for ActivateOrder {
    type Aggregate = Order;

    fn aggregate_id(&self) -> &AggregateId {
        &self.order_id
    }

    fn name(&self) -> &'static str {
        "activate_order"
    }
}

/// Every command the order handler accepts.
#[derive(Debug, Clone)]
pub enum OrderCommand {
    Place(PlaceOrder),
    Activate(ActivateOrder),
}

impl Command for OrderCommand {
    type Aggregate = Order;

    fn aggregate_id(&self) -> &AggregateId {
        match self {
            OrderCommand::Place(cmd) => cmd.aggregate_id(),
            OrderCommand::Activate(cmd) => cmd.aggregate_id(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            OrderCommand::Place(cmd) => cmd.name(),
            OrderCommand::Activate(cmd) => cmd.name(),
        }
    }
}

impl From<PlaceOrder> for OrderCommand {
    fn from(cmd: PlaceOrder) -> Self {
        OrderCommand::Place(cmd)
    }
}

impl From<ActivateOrder> for OrderCommand {
    fn from(cmd: ActivateOrder) -> Self {
        OrderCommand::Activate(cmd)
    }
}
