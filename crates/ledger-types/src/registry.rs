//! Registry trait for self-registering implementations.
//!
//! This module provides the base trait that pluggable implementations
//! (storage backends, meal sources) implement to register themselves with
//! their configuration name and factory function.

/// Base trait for implementation registries.
///
/// Each pluggable module provides a Registry struct implementing this
/// trait, declaring the name used in configuration files and a factory
/// function that builds the implementation from its config section.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	///
	/// This should match the key used in the TOML configuration, for example:
	/// - "memory" for storage.implementations.memory
	/// - "themealdb" for meal_source.implementations.themealdb
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
