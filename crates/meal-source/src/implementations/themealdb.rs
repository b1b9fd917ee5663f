//! TheMealDB meal source implementation.
//!
//! Queries the public TheMealDB API's filter-by-ingredient endpoint and
//! coerces its wire format into [`MealDescriptor`]s. The API reports zero
//! matches as a JSON `null` in the `meals` field; that maps to an empty
//! result list here, never an error.

use crate::{normalize_ingredient, MealSourceError, MealSourceFactory, MealSourceInterface,
	MealSourceRegistry};
use async_trait::async_trait;
use ledger_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, MealDescriptor,
	Schema, ValidationError};
use serde::Deserialize;
use std::time::Duration;

/// Default API endpoint (the free v1 test key).
const DEFAULT_ENDPOINT: &str = "https://www.themealdb.com/api/json/v1/1";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Wire format of the filter.php response.
#[derive(Debug, Deserialize)]
struct FilterResponse {
	/// `null` when no meals match the ingredient.
	meals: Option<Vec<ApiMeal>>,
}

/// Wire format of a single meal entry.
#[derive(Debug, Deserialize)]
struct ApiMeal {
	#[serde(rename = "strMeal")]
	name: String,
	#[serde(rename = "strMealThumb")]
	thumbnail: String,
}

impl From<ApiMeal> for MealDescriptor {
	fn from(meal: ApiMeal) -> Self {
		MealDescriptor::new(meal.name, meal.thumbnail)
	}
}

/// Meal source backed by TheMealDB's HTTP API.
pub struct TheMealDbSource {
	/// Shared HTTP client with the configured timeout.
	client: reqwest::Client,
	/// API base URL, without a trailing slash.
	endpoint: String,
}

impl TheMealDbSource {
	/// Creates a new TheMealDB source with the given endpoint and timeout.
	pub fn new(endpoint: String, timeout: Duration) -> Result<Self, MealSourceError> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| MealSourceError::Configuration(e.to_string()))?;

		Ok(Self {
			client,
			endpoint: endpoint.trim_end_matches('/').to_string(),
		})
	}
}

#[async_trait]
impl MealSourceInterface for TheMealDbSource {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(TheMealDbSchema)
	}

	async fn search(&self, ingredient: &str) -> Result<Vec<MealDescriptor>, MealSourceError> {
		let ingredient = normalize_ingredient(ingredient);
		let url = format!("{}/filter.php?i={}", self.endpoint, ingredient);

		tracing::debug!("Searching meals for ingredient '{}'", ingredient);

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| MealSourceError::Http(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(MealSourceError::Api(status.as_u16()));
		}

		let body: FilterResponse = response
			.json()
			.await
			.map_err(|e| MealSourceError::Parse(e.to_string()))?;

		let meals: Vec<MealDescriptor> = body
			.meals
			.unwrap_or_default()
			.into_iter()
			.map(MealDescriptor::from)
			.collect();

		tracing::debug!("Found {} meals for '{}'", meals.len(), ingredient);
		Ok(meals)
	}
}

/// Configuration schema for TheMealDbSource.
pub struct TheMealDbSchema;

impl ConfigSchema for TheMealDbSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![], // No required fields
			vec![
				Field::new("endpoint", FieldType::String),
				Field::new(
					"timeout_seconds",
					FieldType::Integer {
						min: Some(1),
						max: Some(300),
					},
				),
			],
		);
		schema.validate(config)
	}
}

/// Registry entry for the TheMealDB meal source.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "themealdb";
	type Factory = MealSourceFactory;

	fn factory() -> Self::Factory {
		create_meal_source
	}
}

impl MealSourceRegistry for Registry {}

/// Factory function to create a TheMealDB source from configuration.
///
/// Configuration parameters:
/// - `endpoint`: API base URL (default: the public v1 test endpoint)
/// - `timeout_seconds`: request timeout (default: 10)
pub fn create_meal_source(
	config: &toml::Value,
) -> Result<Box<dyn MealSourceInterface>, MealSourceError> {
	let endpoint = config
		.get("endpoint")
		.and_then(|v| v.as_str())
		.unwrap_or(DEFAULT_ENDPOINT)
		.to_string();

	let timeout_seconds = config
		.get("timeout_seconds")
		.and_then(|v| v.as_integer())
		.map(|v| v as u64)
		.unwrap_or(DEFAULT_TIMEOUT_SECONDS);

	Ok(Box::new(TheMealDbSource::new(
		endpoint,
		Duration::from_secs(timeout_seconds),
	)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_filter_response() {
		let json = r#"{
			"meals": [
				{
					"strMeal": "Chicken Handi",
					"strMealThumb": "https://www.themealdb.com/images/media/meals/wyxwsp1486979827.jpg",
					"idMeal": "52795"
				},
				{
					"strMeal": "Kung Pao Chicken",
					"strMealThumb": "https://www.themealdb.com/images/media/meals/1525872624.jpg",
					"idMeal": "52945"
				}
			]
		}"#;

		let response: FilterResponse = serde_json::from_str(json).unwrap();
		let meals: Vec<MealDescriptor> = response
			.meals
			.unwrap()
			.into_iter()
			.map(MealDescriptor::from)
			.collect();

		assert_eq!(meals.len(), 2);
		assert_eq!(meals[0].description, "Chicken Handi");
		assert!(meals[0].image.ends_with(".jpg"));
	}

	#[test]
	fn null_meals_is_zero_results() {
		let response: FilterResponse = serde_json::from_str(r#"{"meals": null}"#).unwrap();
		assert!(response.meals.is_none());
	}

	#[test]
	fn factory_applies_defaults() {
		let config: toml::Value = "".parse().unwrap();
		assert!(create_meal_source(&config).is_ok());
	}

	#[test]
	fn schema_rejects_bad_timeout() {
		let config: toml::Value = "timeout_seconds = 0".parse().unwrap();
		let schema = TheMealDbSchema;
		assert!(schema.validate(&config).is_err());
	}
}
