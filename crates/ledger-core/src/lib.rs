//! Order ledger module for the meal ledger system.
//!
//! This module owns the list of orders and the monotonic order-number
//! counter, and provides the create, list, complete, delete, clear-all,
//! and count operations over an injected persistent store. Every mutation
//! is persisted before the operation reports success.
//!
//! The ledger returns typed outcomes and never logs or renders; turning
//! an error kind into a user-visible message is the presentation layer's
//! job. After each successful mutation the ledger emits a [`LedgerEvent`]
//! on an optional notification channel so the presentation layer can
//! refresh its view.

use chrono::Local;
use ledger_storage::{StorageError, StorageService};
use ledger_types::{LedgerEvent, MealDescriptor, Order, StorageKey};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during ledger operations.
///
/// All variants are recoverable and carry no retry semantics; the caller
/// decides whether to inform the user and must not automatically retry.
#[derive(Debug, Error)]
pub enum LedgerError {
	/// Error that occurs when no order has the requested number.
	#[error("Order number not found")]
	NotFound,
	/// Error that occurs when completing an order that is already complete.
	#[error("Order is already marked complete")]
	AlreadyComplete,
	/// Error that occurs when clearing a ledger with no orders.
	#[error("There are no orders to clear")]
	NothingToClear,
	/// Error that occurs in the underlying persistent store.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// The order ledger.
///
/// Owns the order sequence and the `lastOrderNumber` counter, persisted
/// under their respective storage keys. Order numbers strictly increase by
/// one per creation and are never reassigned, even after deletion.
pub struct OrderLedger {
	/// Injected durability layer. The ledger is the only writer.
	storage: StorageService,
	/// Optional notification hook for the presentation layer.
	notifier: Option<mpsc::UnboundedSender<LedgerEvent>>,
}

impl OrderLedger {
	/// Creates a new ledger over the given storage service.
	pub fn new(storage: StorageService) -> Self {
		Self {
			storage,
			notifier: None,
		}
	}

	/// Attaches a notification channel that receives a [`LedgerEvent`]
	/// after every successful mutating operation.
	pub fn with_notifier(mut self, notifier: mpsc::UnboundedSender<LedgerEvent>) -> Self {
		self.notifier = Some(notifier);
		self
	}

	/// Creates a new order from the given meal descriptor.
	///
	/// Assigns the next order number, stamps the creation time, appends
	/// the order to the sequence, and persists both the sequence and the
	/// counter before returning the created order. The descriptor is not
	/// validated; an empty description is accepted.
	pub async fn create(&self, meal: MealDescriptor) -> Result<Order, LedgerError> {
		let mut orders = self.load_orders().await?;
		let order_number = self.load_counter().await? + 1;

		let order = Order {
			order_number,
			description: meal.description,
			image: meal.image,
			complete: false,
			timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
		};

		orders.push(order.clone());
		self.save_orders(&orders).await?;
		self.save_counter(order_number).await?;

		self.notify(LedgerEvent::OrderPlaced {
			order: order.clone(),
		});
		Ok(order)
	}

	/// Returns all orders in insertion order. No side effects.
	pub async fn list(&self) -> Result<Vec<Order>, LedgerError> {
		self.load_orders().await
	}

	/// Marks the order with the given number as complete.
	///
	/// Fails with [`LedgerError::NotFound`] when no order has that number
	/// and with [`LedgerError::AlreadyComplete`] when the order is already
	/// complete. Completing twice is a reported error, not a silent no-op.
	pub async fn complete(&self, order_number: u64) -> Result<(), LedgerError> {
		let mut orders = self.load_orders().await?;

		let order = orders
			.iter_mut()
			.find(|order| order.order_number == order_number)
			.ok_or(LedgerError::NotFound)?;

		if order.complete {
			return Err(LedgerError::AlreadyComplete);
		}

		order.complete = true;
		self.save_orders(&orders).await?;

		self.notify(LedgerEvent::OrderCompleted { order_number });
		Ok(())
	}

	/// Deletes the order with the given number.
	///
	/// Filter semantics: deleting a number that is not present is a silent
	/// no-op, and the sequence is persisted either way. Any confirmation
	/// step happens in the caller before this is invoked. A deleted number
	/// is never reassigned.
	pub async fn delete(&self, order_number: u64) -> Result<(), LedgerError> {
		let mut orders = self.load_orders().await?;
		orders.retain(|order| order.order_number != order_number);
		self.save_orders(&orders).await?;

		self.notify(LedgerEvent::OrderDeleted { order_number });
		Ok(())
	}

	/// Clears all orders and resets the counter.
	///
	/// Fails with [`LedgerError::NothingToClear`] when the ledger is
	/// already empty, without touching the store. Otherwise both persisted
	/// keys are removed; the next created order starts again at 1.
	pub async fn clear_all(&self) -> Result<(), LedgerError> {
		let orders = self.load_orders().await?;
		if orders.is_empty() {
			return Err(LedgerError::NothingToClear);
		}

		self.storage.remove(StorageKey::Orders.as_str()).await?;
		self.storage
			.remove(StorageKey::LastOrderNumber.as_str())
			.await?;

		self.notify(LedgerEvent::OrdersCleared);
		Ok(())
	}

	/// Returns the current number of orders, for display purposes.
	pub async fn count(&self) -> Result<usize, LedgerError> {
		Ok(self.load_orders().await?.len())
	}

	/// Loads the order sequence from storage.
	///
	/// A missing key is empty state. Persisted bytes that fail to decode
	/// are also treated as empty state, preserving the original silent
	/// fallback; the next successful mutation overwrites them.
	async fn load_orders(&self) -> Result<Vec<Order>, LedgerError> {
		match self
			.storage
			.retrieve::<Vec<Order>>(StorageKey::Orders.as_str())
			.await
		{
			Ok(orders) => Ok(orders),
			Err(StorageError::NotFound) | Err(StorageError::Serialization(_)) => Ok(Vec::new()),
			Err(e) => Err(e.into()),
		}
	}

	/// Loads the order-number counter from storage.
	///
	/// A missing or undecodable counter is 0, with the same silent
	/// fallback as the order sequence.
	async fn load_counter(&self) -> Result<u64, LedgerError> {
		match self
			.storage
			.retrieve::<u64>(StorageKey::LastOrderNumber.as_str())
			.await
		{
			Ok(counter) => Ok(counter),
			Err(StorageError::NotFound) | Err(StorageError::Serialization(_)) => Ok(0),
			Err(e) => Err(e.into()),
		}
	}

	async fn save_orders(&self, orders: &[Order]) -> Result<(), LedgerError> {
		self.storage
			.store(StorageKey::Orders.as_str(), &orders)
			.await?;
		Ok(())
	}

	async fn save_counter(&self, counter: u64) -> Result<(), LedgerError> {
		self.storage
			.store(StorageKey::LastOrderNumber.as_str(), &counter)
			.await?;
		Ok(())
	}

	/// Sends an event to the notifier, if one is attached.
	/// A dropped receiver is ignored.
	fn notify(&self, event: LedgerEvent) {
		if let Some(notifier) = &self.notifier {
			let _ = notifier.send(event);
		}
	}
}
