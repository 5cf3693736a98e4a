//! The total income, expenses and balance across all transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    transaction::{TransactionKind, get_decimal},
};

/// The totals for each transaction kind and the difference between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// The sum of all income amounts.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub income: Decimal,
    /// The sum of all expense amounts.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub expense: Decimal,
    /// `income - expense`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

/// Sum the amounts of all transactions, grouped by kind.
///
/// Amounts are stored as text, which SQLite would sum as floating point
/// numbers, so the rows are summed here with exact decimal arithmetic.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if the query fails or a stored amount is not a valid
///   decimal,
/// - or [Error::BalanceOverflow] if a total does not fit in a [Decimal].
pub fn get_balance(connection: &Connection) -> Result<Balance, Error> {
    let mut statement = connection.prepare("SELECT kind, amount FROM \"transaction\"")?;
    let rows = statement.query_map([], |row| {
        let kind: TransactionKind = row.get(0)?;
        let amount = get_decimal(row, 1)?;

        Ok((kind, amount))
    })?;

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for row in rows {
        let (kind, amount) = row?;
        let total = match kind {
            TransactionKind::Income => &mut income,
            TransactionKind::Expense => &mut expense,
        };

        *total = total
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow)?;
    }

    let balance = income
        .checked_sub(expense)
        .ok_or(Error::BalanceOverflow)?;

    Ok(Balance {
        income,
        expense,
        balance,
    })
}

/// The state needed to get the balance.
#[derive(Debug, Clone)]
pub struct BalanceState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BalanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the current [Balance] as JSON.
pub async fn get_balance_endpoint(State(state): State<BalanceState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_balance(&connection) {
        Ok(balance) => Json(balance).into_response(),
        Err(error) => {
            tracing::error!("Could not calculate balance: {error}");
            error.into_response()
        }
    }
}
