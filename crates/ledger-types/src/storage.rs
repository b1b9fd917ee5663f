//! Storage-related types for the meal ledger.

/// Storage keys for the persisted ledger state.
///
/// This enum provides type safety for storage operations by replacing
/// string literals with strongly typed variants. The string values match
/// the original persisted layout: absence of either key is empty state,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Key for the JSON array of orders
	Orders,
	/// Key for the monotonic order-number counter
	LastOrderNumber,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Orders => "orders",
			StorageKey::LastOrderNumber => "lastOrderNumber",
		}
	}
}
