//! Meal source module for the meal ledger system.
//!
//! This module handles querying external recipe providers for meals
//! matching an ingredient. It provides the abstraction the presentation
//! layer searches through; wire formats are coerced into the shared
//! [`MealDescriptor`] shape once, at this boundary, so nothing downstream
//! depends on a provider's field names.

use async_trait::async_trait;
use ledger_types::{ConfigSchema, ImplementationRegistry, MealDescriptor};
use rand::seq::SliceRandom;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod themealdb;
}

/// Errors that can occur during meal source operations.
///
/// Zero search results is a valid outcome, not an error; callers receive
/// an empty list and are responsible for informing the user.
#[derive(Debug, Error)]
pub enum MealSourceError {
	/// Error that occurs when the HTTP request fails at the transport level.
	#[error("HTTP error: {0}")]
	Http(String),
	/// Error that occurs when the provider responds with a non-success status.
	#[error("API returned status {0}")]
	Api(u16),
	/// Error that occurs when decoding the response body fails.
	#[error("Parse error: {0}")]
	Parse(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for meal source implementations.
///
/// This trait must be implemented by any recipe provider that wants to
/// supply meals to the ledger's presentation layer.
#[async_trait]
pub trait MealSourceInterface: Send + Sync {
	/// Returns the configuration schema for this meal source implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Searches for meals containing the given ingredient.
	///
	/// The ingredient is normalized before being sent to the provider.
	/// An empty result list means no meals matched; it is not an error.
	async fn search(&self, ingredient: &str) -> Result<Vec<MealDescriptor>, MealSourceError>;
}

/// Type alias for meal source factory functions.
pub type MealSourceFactory =
	fn(&toml::Value) -> Result<Box<dyn MealSourceInterface>, MealSourceError>;

/// Registry trait for meal source implementations.
pub trait MealSourceRegistry: ImplementationRegistry<Factory = MealSourceFactory> {}

/// Get all registered meal source implementations.
///
/// Returns a vector of (name, factory) tuples for all available meal
/// source implementations.
pub fn get_all_implementations() -> Vec<(&'static str, MealSourceFactory)> {
	use implementations::themealdb;

	vec![(themealdb::Registry::NAME, themealdb::Registry::factory())]
}

/// Normalizes a raw user-entered ingredient for provider queries.
///
/// Trims surrounding whitespace, lowercases, and collapses internal
/// whitespace runs into single underscores ("Chicken  Breast" becomes
/// "chicken_breast").
pub fn normalize_ingredient(raw: &str) -> String {
	raw.trim()
		.to_lowercase()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join("_")
}

/// Picks one meal at random from a search result.
///
/// Powers the "chef's favorite" flow: the caller searches, then lets the
/// house choose. Returns None for an empty result list.
pub fn random_pick(meals: &[MealDescriptor]) -> Option<&MealDescriptor> {
	meals.choose(&mut rand::thread_rng())
}

/// Finds a meal by name in a search result, case-insensitively.
///
/// Powers ordering a specific suggestion instead of the random pick.
/// Returns None when no meal in the list has that name.
pub fn find_by_name<'a>(meals: &'a [MealDescriptor], name: &str) -> Option<&'a MealDescriptor> {
	let wanted = name.trim().to_lowercase();
	meals
		.iter()
		.find(|meal| meal.description.to_lowercase() == wanted)
}
