//! Transaction management for the record-keeping service.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `TransactionFields` sent by clients
//! - The `TransactionStore` trait and its SQLite implementation
//! - Route handlers for creating, reading, updating and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod store;
mod view_endpoint;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{Transaction, TransactionFields, TransactionType, UnknownTransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{TRANSACTION_DELETED, delete_transaction_endpoint};
pub use edit_endpoint::edit_transaction_endpoint;
pub use store::{SQLiteTransactionStore, TransactionStore, TypeTotals, create_transaction_table};
pub use view_endpoint::{get_transaction_endpoint, get_transactions_endpoint};

pub use crate::database_id::TransactionId;
