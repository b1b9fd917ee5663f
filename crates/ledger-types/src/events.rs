//! Ledger event types for presentation-layer notifications.
//!
//! The ledger emits an event after every successful mutating operation.
//! A presentation layer can subscribe to the event channel and refresh
//! its view without polling; the ledger itself never renders or logs.

use crate::Order;
use serde::{Deserialize, Serialize};

/// Events emitted by the ledger after successful mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerEvent {
	/// A new order was created and persisted.
	OrderPlaced { order: Order },
	/// An order was marked complete.
	OrderCompleted { order_number: u64 },
	/// An order was deleted.
	OrderDeleted { order_number: u64 },
	/// All orders and the counter were cleared.
	OrdersCleared,
}
