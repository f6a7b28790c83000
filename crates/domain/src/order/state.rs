//! Order lifecycle state.

use serde::{Deserialize, Serialize};

/// Where an order sits in the order book.
///
/// State transitions:
/// ```text
/// (built) ──queue──► Pending ──process_next──► Processed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// Queued, waiting to be processed.
    Pending,

    /// Stock has been deducted and revenue counted (terminal state).
    Processed,
}

impl OrderState {
    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Processed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "Pending",
            OrderState::Processed => "Processed",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
