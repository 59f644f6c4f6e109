//! Order aggregate implementation.

use common::AggregateId;
use event_store::Version;

use crate::aggregate::{Aggregate, DomainEvent};

use super::{OrderError, OrderEvent, OrderLine, OrderStatus};

/// Order aggregate root.
///
/// Every field is derived from applied events; [`Aggregate::apply`] is the
/// only code that writes them.
#[derive(Debug, Clone, Default)]
pub struct Order {
    /// Order identifier, assigned by the first event.
    id: AggregateId,

    /// Version of the last persisted event.
    version: Version,

    /// Current status of the order.
    status: OrderStatus,

    /// Lines the order was placed with.
    lines: Vec<OrderLine>,

    /// Events recorded since the order was loaded or last saved.
    uncommitted: Vec<OrderEvent>,
}

impl Aggregate for Order {
    type Event = OrderEvent;
    type Error = OrderError;

    fn aggregate_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> &AggregateId {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: &Self::Event) {
        self.id = event.aggregate_id().clone();

        match event {
            OrderEvent::Placed(data) => {
                self.status = OrderStatus::Placed;
                self.lines = data.lines.clone();
            }
            OrderEvent::Activated(_) => {
                self.status = OrderStatus::Activated;
            }
        }
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted)
    }
}

// Query methods
impl Order {
    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the lines the order was placed with.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Returns true if the order has been placed (and possibly activated).
    pub fn is_placed(&self) -> bool {
        !self.id.is_empty()
    }
}

// Command methods
impl Order {
    /// Places the order under `order_id` with the given lines.
    ///
    /// Only a fresh order without an identifier can be placed. Nothing is
    /// recorded on failure.
    pub fn place(&mut self, order_id: AggregateId, lines: Vec<OrderLine>) -> Result<(), OrderError> {
        if !self.id.is_empty() {
            return Err(OrderError::AlreadyPlaced);
        }

        if lines.is_empty() {
            return Err(OrderError::EmptyOrderLine);
        }

        if order_id.is_empty() {
            return Err(OrderError::OrderIdRequired);
        }

        self.record(OrderEvent::placed(order_id, lines));
        Ok(())
    }

    /// Activates a placed order.
    ///
    /// In any other status this is a no-op: activating twice, or activating an
    /// order that was never placed, records nothing and is not an error.
    pub fn activate(&mut self) {
        if self.status.can_activate() {
            self.record(OrderEvent::activated(self.id.clone()));
        }
    }

    /// Applies a newly generated event and buffers it for saving.
    fn record(&mut self, event: OrderEvent) {
        self.apply(&event);
        self.uncommitted.push(event);
    }
}
