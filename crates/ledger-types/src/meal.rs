//! Meal descriptor type for data crossing the meal-source boundary.

use serde::{Deserialize, Serialize};

/// A meal offered by a meal source.
///
/// This is the explicit transfer shape handed to the ledger when placing
/// an order. Meal sources coerce their wire formats into this shape once,
/// at their boundary; the ledger treats both fields as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealDescriptor {
	/// Meal name.
	pub description: String,
	/// Meal image URL.
	pub image: String,
}

impl MealDescriptor {
	/// Creates a new meal descriptor.
	pub fn new(description: impl Into<String>, image: impl Into<String>) -> Self {
		Self {
			description: description.into(),
			image: image.into(),
		}
	}
}
