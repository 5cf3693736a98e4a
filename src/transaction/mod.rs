//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validation rules for its fields
//! - Database functions for storing, querying, updating and deleting transactions
//! - Route handlers for the transaction JSON API

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod list_endpoint;
mod patch;
mod query;
mod state;
mod update_endpoint;

pub use core::{
    NewTransaction, Transaction, TransactionKind, create_transaction, create_transaction_table,
    delete_transaction, get_transaction, map_transaction_row, parse_kind,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::{ListQuery, list_transactions_endpoint};
pub use patch::{Patch, TransactionPatch, update_transaction};
pub use query::{TransactionFilter, list_transactions};
pub use state::TransactionState;
pub use update_endpoint::update_transaction_endpoint;

pub(crate) use core::get_decimal;
