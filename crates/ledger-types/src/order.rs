//! Order record types for the meal ledger.
//!
//! This module defines the order entity tracked by the ledger, including
//! its persisted JSON representation.

use serde::{Deserialize, Serialize};

/// A single placed meal order tracked by the ledger.
///
/// Orders are created only by the ledger's create operation, mutated only
/// by the complete operation (a one-way flip of `complete`), and removed
/// only by delete or clear-all. The serde renames preserve the field names
/// of the persisted JSON layout, so ledgers written by earlier versions of
/// the application deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	/// Unique, monotonically assigned number. Never reused after deletion.
	#[serde(rename = "orderNumber")]
	pub order_number: u64,
	/// Meal name. Opaque to the ledger.
	pub description: String,
	/// Meal image URL. Opaque reference, not validated.
	pub image: String,
	/// Completion flag. Starts false; once true it never reverts.
	pub complete: bool,
	/// Human-readable creation time. Set at creation, immutable.
	pub timestamp: String,
}
