//! Configuration module for the meal ledger system.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! validates that the selected implementations are actually configured
//! before the service starts wiring them up.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the meal ledger service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to the ledger instance.
	pub ledger: LedgerConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Configuration for the meal source.
	pub meal_source: MealSourceConfig,
}

/// Configuration specific to the ledger instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
	/// Identifier for this ledger instance, used in log output.
	pub id: String,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	/// Each implementation's section is kept as a raw TOML value and
	/// validated by the implementation's own schema.
	#[serde(default)]
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the meal source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MealSourceConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of meal source implementation names to their configurations.
	#[serde(default)]
	pub implementations: HashMap<String, toml::Value>,
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates cross-field constraints that serde cannot express.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.ledger.id.is_empty() {
			return Err(ConfigError::Validation("ledger.id must not be empty".into()));
		}

		if !self.storage.implementations.contains_key(&self.storage.primary) {
			return Err(ConfigError::Validation(format!(
				"storage.primary '{}' has no [storage.implementations.{}] section",
				self.storage.primary, self.storage.primary
			)));
		}

		if !self
			.meal_source
			.implementations
			.contains_key(&self.meal_source.primary)
		{
			return Err(ConfigError::Validation(format!(
				"meal_source.primary '{}' has no [meal_source.implementations.{}] section",
				self.meal_source.primary, self.meal_source.primary
			)));
		}

		Ok(())
	}

	/// Returns the config section of the primary storage implementation.
	pub fn primary_storage(&self) -> (&str, &toml::Value) {
		// validate() guarantees the entry exists
		(
			&self.storage.primary,
			&self.storage.implementations[&self.storage.primary],
		)
	}

	/// Returns the config section of the primary meal source implementation.
	pub fn primary_meal_source(&self) -> (&str, &toml::Value) {
		(
			&self.meal_source.primary,
			&self.meal_source.implementations[&self.meal_source.primary],
		)
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"
		[ledger]
		id = "meal-ledger"

		[storage]
		primary = "memory"
		[storage.implementations.memory]

		[meal_source]
		primary = "themealdb"
		[meal_source.implementations.themealdb]
		endpoint = "https://www.themealdb.com/api/json/v1/1"
		timeout_seconds = 10
	"#;

	#[test]
	fn parses_sample_config() {
		let config: Config = SAMPLE.parse().unwrap();
		assert_eq!(config.ledger.id, "meal-ledger");

		let (name, _) = config.primary_storage();
		assert_eq!(name, "memory");

		let (name, section) = config.primary_meal_source();
		assert_eq!(name, "themealdb");
		assert_eq!(
			section.get("timeout_seconds").and_then(|v| v.as_integer()),
			Some(10)
		);
	}

	#[test]
	fn rejects_unconfigured_primary() {
		let bad = SAMPLE.replace("primary = \"memory\"", "primary = \"redis\"");
		let result: Result<Config, _> = bad.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn rejects_empty_ledger_id() {
		let bad = SAMPLE.replace("id = \"meal-ledger\"", "id = \"\"");
		let result: Result<Config, _> = bad.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn missing_section_is_a_parse_error() {
		let result: Result<Config, _> = "[ledger]\nid = 'x'".parse();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}
}
