//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order, derived from its event history.
///
/// Transitions:
/// ```text
/// New ──Placed──► Placed ──Activated──► Activated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// No event has been applied (fresh or never-stored order).
    #[default]
    New,

    /// The order has been placed with its lines.
    Placed,

    /// The order has been activated.
    Activated,
}

impl OrderStatus {
    /// Returns true if the order can be activated in this status.
    pub fn can_activate(&self) -> bool {
        matches!(self, OrderStatus::Placed)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Placed => "Placed",
            OrderStatus::Activated => "Activated",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
