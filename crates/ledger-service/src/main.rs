//! Main entry point for the meal ledger service.
//!
//! This binary is the presentation layer over the order ledger: it wires
//! the configured storage backend and meal source to the ledger core and
//! exposes the user flows as CLI subcommands. All user-facing rendering,
//! including messages, confirmation prompts, and error wording, lives
//! here; the ledger itself only returns typed outcomes.

use clap::{Parser, Subcommand};
use ledger_config::Config;
use ledger_core::{LedgerError, OrderLedger};
use ledger_storage::{StorageInterface, StorageService};
use ledger_types::{LedgerEvent, Order};
use meal_source::MealSourceInterface;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Command-line arguments for the meal ledger service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

/// User flows exposed by the service.
#[derive(Subcommand, Debug)]
enum Command {
	/// Search the meal source for meals containing an ingredient
	Search { ingredient: String },
	/// Order a meal matching an ingredient: a named one, or the chef's
	/// favorite picked at random
	Order {
		ingredient: String,
		/// Order this meal from the search results instead of a random one
		#[arg(long)]
		name: Option<String>,
	},
	/// List all current orders
	List,
	/// Mark an order as complete by its number
	Complete { number: u64 },
	/// Delete an order by its number
	Delete {
		number: u64,
		/// Skip the confirmation prompt
		#[arg(long)]
		yes: bool,
	},
	/// Clear all orders and reset the numbering
	Clear {
		/// Skip the confirmation prompt
		#[arg(long)]
		yes: bool,
	},
	/// Print the current number of orders
	Count,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).init();

	// Load configuration
	let config = Config::from_file(&args.config)?;
	tracing::info!("Loaded configuration [{}]", config.ledger.id);

	// Wire implementations from configuration
	let storage = build_storage(&config)?;
	let source = build_meal_source(&config)?;

	// The event channel is the ledger's view-refresh hook; here the
	// subscriber just logs each mutation.
	let (tx, mut rx) = mpsc::unbounded_channel();
	let listener = tokio::spawn(async move {
		while let Some(event) = rx.recv().await {
			match event {
				LedgerEvent::OrderPlaced { order } => {
					tracing::info!("Order #{} placed: {}", order.order_number, order.description)
				},
				LedgerEvent::OrderCompleted { order_number } => {
					tracing::info!("Order #{} completed", order_number)
				},
				LedgerEvent::OrderDeleted { order_number } => {
					tracing::info!("Order #{} deleted", order_number)
				},
				LedgerEvent::OrdersCleared => tracing::info!("All orders cleared"),
			}
		}
	});

	let ledger = OrderLedger::new(StorageService::new(storage)).with_notifier(tx);

	run_command(args.command, &ledger, source.as_ref()).await?;

	// Dropping the ledger closes the event channel and ends the listener
	drop(ledger);
	let _ = listener.await;

	Ok(())
}

/// Builds the configured primary storage backend.
///
/// The implementation's own schema validates its config section before
/// the backend is handed to the ledger.
fn build_storage(config: &Config) -> Result<Box<dyn StorageInterface>, Box<dyn std::error::Error>> {
	let (name, section) = config.primary_storage();

	let factory = ledger_storage::get_all_implementations()
		.into_iter()
		.find(|(impl_name, _)| *impl_name == name)
		.map(|(_, factory)| factory)
		.ok_or_else(|| format!("Unknown storage implementation '{}'", name))?;

	let backend = factory(section)?;
	backend.config_schema().validate(section)?;
	Ok(backend)
}

/// Builds the configured primary meal source.
fn build_meal_source(
	config: &Config,
) -> Result<Box<dyn MealSourceInterface>, Box<dyn std::error::Error>> {
	let (name, section) = config.primary_meal_source();

	let factory = meal_source::get_all_implementations()
		.into_iter()
		.find(|(impl_name, _)| *impl_name == name)
		.map(|(_, factory)| factory)
		.ok_or_else(|| format!("Unknown meal source implementation '{}'", name))?;

	let source = factory(section)?;
	source.config_schema().validate(section)?;
	Ok(source)
}

/// Executes one user flow against the ledger and meal source.
async fn run_command(
	command: Command,
	ledger: &OrderLedger,
	source: &dyn MealSourceInterface,
) -> Result<(), Box<dyn std::error::Error>> {
	match command {
		Command::Search { ingredient } => {
			if ingredient.trim().is_empty() {
				println!("Please enter an ingredient");
				return Ok(());
			}

			let meals = source.search(&ingredient).await?;
			if meals.is_empty() {
				println!("No meals found for that ingredient. Please try another one.");
				return Ok(());
			}

			println!("Meals containing {}:", ingredient.trim().to_lowercase());
			for meal in &meals {
				println!("  {}", meal.description);
			}
		},
		Command::Order { ingredient, name } => {
			if ingredient.trim().is_empty() {
				println!("Please enter an ingredient");
				return Ok(());
			}

			let meals = source.search(&ingredient).await?;
			let picked = match &name {
				// A named order must match one of the suggestions
				Some(name) => meal_source::find_by_name(&meals, name),
				None => meal_source::random_pick(&meals),
			};

			match picked {
				None => println!("No meal found"),
				Some(meal) => {
					let order = ledger.create(meal.clone()).await?;
					println!("Ordered: {}", order.description);
					println!("Order #{} placed.", order.order_number);
				},
			}
		},
		Command::List => {
			let orders = ledger.list().await?;
			if orders.is_empty() {
				println!("No current orders.");
				return Ok(());
			}

			for order in &orders {
				print_order(order);
			}
			println!("{} order(s).", orders.len());
		},
		Command::Complete { number } => match ledger.complete(number).await {
			Ok(()) => println!("Order #{} marked as complete.", number),
			Err(e) => println!("{}", render_ledger_error(&e)),
		},
		Command::Delete { number, yes } => {
			if !yes && !confirm(&format!("Delete order #{}?", number))? {
				return Ok(());
			}

			match ledger.delete(number).await {
				Ok(()) => println!("Order #{} deleted", number),
				Err(e) => println!("{}", render_ledger_error(&e)),
			}
		},
		Command::Clear { yes } => {
			// Nothing to confirm when the ledger is already empty
			if ledger.count().await? == 0 {
				println!("There are no orders to clear.");
				return Ok(());
			}

			if !yes && !confirm("Are you sure you want to clear all orders?")? {
				return Ok(());
			}

			match ledger.clear_all().await {
				Ok(()) => println!("All orders cleared."),
				Err(e) => println!("{}", render_ledger_error(&e)),
			}
		},
		Command::Count => {
			println!("{}", ledger.count().await?);
		},
	}

	Ok(())
}

/// Renders one order line: number, description, status badge, timestamp.
fn print_order(order: &Order) {
	let badge = if order.complete { "Completed" } else { "Pending" };
	println!(
		"#{} {} [{}] {}",
		order.order_number, order.description, badge, order.timestamp
	);
}

/// Maps a ledger error kind to its user-facing message.
fn render_ledger_error(error: &LedgerError) -> &'static str {
	match error {
		LedgerError::NotFound => "Order number not found.",
		LedgerError::AlreadyComplete => "This order is already marked complete.",
		LedgerError::NothingToClear => "There are no orders to clear.",
		LedgerError::Storage(_) => "Could not reach the order store.",
	}
}

/// Asks a yes/no question on stdin. Anything but y/yes declines.
fn confirm(prompt: &str) -> std::io::Result<bool> {
	print!("{} [y/N] ", prompt);
	std::io::stdout().flush()?;

	let mut answer = String::new();
	std::io::stdin().read_line(&mut answer)?;
	let answer = answer.trim().to_lowercase();
	Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use ledger_storage::implementations::memory::MemoryStorage;
	use ledger_types::{ConfigSchema, MealDescriptor, Schema, ValidationError};
	use meal_source::MealSourceError;

	/// Meal source stub that returns the same meals for every search.
	struct FixedMeals(Vec<MealDescriptor>);

	struct FixedMealsSchema;

	impl ConfigSchema for FixedMealsSchema {
		fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
			Schema::new(vec![], vec![]).validate(config)
		}
	}

	#[async_trait]
	impl MealSourceInterface for FixedMeals {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			Box::new(FixedMealsSchema)
		}

		async fn search(&self, _ingredient: &str) -> Result<Vec<MealDescriptor>, MealSourceError> {
			Ok(self.0.clone())
		}
	}

	fn ledger() -> OrderLedger {
		OrderLedger::new(StorageService::new(Box::new(MemoryStorage::new())))
	}

	fn source() -> FixedMeals {
		FixedMeals(vec![
			MealDescriptor::new("Chicken Handi", "h.jpg"),
			MealDescriptor::new("Kung Pao Chicken", "k.jpg"),
		])
	}

	#[test]
	fn ledger_errors_render_to_user_messages() {
		assert_eq!(
			render_ledger_error(&LedgerError::NotFound),
			"Order number not found."
		);
		assert_eq!(
			render_ledger_error(&LedgerError::AlreadyComplete),
			"This order is already marked complete."
		);
		assert_eq!(
			render_ledger_error(&LedgerError::NothingToClear),
			"There are no orders to clear."
		);
	}

	#[tokio::test]
	async fn order_by_name_creates_that_meal() {
		let ledger = ledger();
		run_command(
			Command::Order {
				ingredient: "chicken".into(),
				name: Some("kung pao chicken".into()),
			},
			&ledger,
			&source(),
		)
		.await
		.unwrap();

		let orders = ledger.list().await.unwrap();
		assert_eq!(orders.len(), 1);
		assert_eq!(orders[0].description, "Kung Pao Chicken");
	}

	#[tokio::test]
	async fn order_by_unknown_name_creates_nothing() {
		let ledger = ledger();
		run_command(
			Command::Order {
				ingredient: "chicken".into(),
				name: Some("Beef Wellington".into()),
			},
			&ledger,
			&source(),
		)
		.await
		.unwrap();

		assert!(ledger.list().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn clear_on_empty_ledger_skips_confirmation() {
		// With an empty ledger the command reports and returns before
		// ever reaching the confirmation prompt
		let ledger = ledger();
		run_command(Command::Clear { yes: false }, &ledger, &source())
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn clear_with_confirmation_skipped_clears_orders() {
		let ledger = ledger();
		ledger
			.create(MealDescriptor::new("Pasta", "p.jpg"))
			.await
			.unwrap();

		run_command(Command::Clear { yes: true }, &ledger, &source())
			.await
			.unwrap();
		assert!(ledger.list().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn delete_with_confirmation_skipped_removes_order() {
		let ledger = ledger();
		let order = ledger
			.create(MealDescriptor::new("Soup", "s.jpg"))
			.await
			.unwrap();

		run_command(
			Command::Delete {
				number: order.order_number,
				yes: true,
			},
			&ledger,
			&source(),
		)
		.await
		.unwrap();
		assert!(ledger.list().await.unwrap().is_empty());
	}
}
