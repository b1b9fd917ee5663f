//! Common types module for the meal ledger system.
//!
//! This module defines the core data types and structures shared by the
//! ledger components. It provides a centralized location for shared types
//! to ensure consistency across storage, meal sourcing, and the ledger core.

/// Ledger event types for the presentation-layer notification hook.
pub mod events;
/// Meal descriptor type coerced at the meal-source boundary.
pub mod meal;
/// Order record type and its persisted representation.
pub mod order;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Storage key types for the persisted ledger state.
pub mod storage;
/// Configuration validation types for implementation config sections.
pub mod validation;

// Re-export all types for convenient access
pub use events::*;
pub use meal::*;
pub use order::*;
pub use registry::*;
pub use storage::*;
pub use validation::*;
