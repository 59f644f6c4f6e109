//! Order domain events.

use chrono::{DateTime, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::OrderLine;

const ORDER_PLACED: &str = "OrderPlaced";
const ORDER_ACTIVATED: &str = "OrderActivated";

/// Events that can occur on an order aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// Order was placed.
    Placed(PlacedData),

    /// Order was activated.
    Activated(ActivatedData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => ORDER_PLACED,
            OrderEvent::Activated(_) => ORDER_ACTIVATED,
        }
    }

    fn aggregate_id(&self) -> &AggregateId {
        match self {
            OrderEvent::Placed(data) => &data.order_id,
            OrderEvent::Activated(data) => &data.order_id,
        }
    }

    fn is_known_type(event_type: &str) -> bool {
        matches!(event_type, ORDER_PLACED | ORDER_ACTIVATED)
    }
}

/// Data for the Placed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedData {
    /// The order that was placed.
    pub order_id: AggregateId,

    /// Lines the order was placed with.
    pub lines: Vec<OrderLine>,

    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// Data for the Activated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatedData {
    /// The order that was activated.
    pub order_id: AggregateId,

    /// When the order was activated.
    pub activated_at: DateTime<Utc>,
}

// Convenience constructors for events
impl OrderEvent {
    /// Creates a Placed event.
    pub fn placed(order_id: AggregateId, lines: Vec<OrderLine>) -> Self {
        OrderEvent::Placed(PlacedData {
            order_id,
            lines,
            placed_at: Utc::now(),
        })
    }

    /// Creates an Activated event.
    pub fn activated(order_id: AggregateId) -> Self {
        OrderEvent::Activated(ActivatedData {
            order_id,
            activated_at: Utc::now(),
        })
    }
}
