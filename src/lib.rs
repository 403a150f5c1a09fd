// Expense Tracker - Core Library
// Exposes the store, filtering and analysis, plus the HTTP API and daily
// summary when the `server` feature is on

pub mod analysis;
pub mod config;
pub mod error;
pub mod expense;
pub mod filter;
pub mod store;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod scheduler;

// Re-export commonly used types
pub use analysis::{analyze, CategoryTotals, SpendingAnalysis};
pub use config::ServerConfig;
pub use error::{ExpenseError, Result};
pub use expense::{Expense, ExpenseDraft, NewExpense};
pub use filter::{parse_date, ExpenseFilter};
pub use store::ExpenseStore;

#[cfg(feature = "server")]
pub use api::{app, AppState};
#[cfg(feature = "server")]
pub use scheduler::{next_run_after, spawn_daily, DailySummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
