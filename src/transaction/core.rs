//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, OptionalExtension, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent in a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money was earned.
    Income,
    /// Money was spent.
    Expense,
}

impl TransactionKind {
    /// The lower-cased name used in the database and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    /// Parse a kind, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if `s` is blank or is not one of
    /// "income" or "expense".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidInput("kind is required".to_owned()));
        }

        match trimmed.to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(Error::InvalidInput(
                "kind must be 'income' or 'expense'".to_owned(),
            )),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Validate a raw, possibly missing, kind.
///
/// The same rule is used when creating and updating transactions and when
/// filtering the transaction list.
///
/// # Errors
/// Returns [Error::InvalidInput] if `raw` is missing, blank or not a valid kind.
pub fn parse_kind(raw: Option<&str>) -> Result<TransactionKind, Error> {
    match raw {
        Some(raw) => raw.parse(),
        None => Err(Error::InvalidInput("kind is required".to_owned())),
    }
}

/// An income or expense, i.e. an event where money was either earned or spent.
///
/// To create a new `Transaction`, use [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money earned or spent. Always greater than zero.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,
    /// A label for grouping transactions, e.g. "Groceries" or "Salary".
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Optional free text about the transaction.
    pub note: Option<String>,
}

/// The unvalidated data for creating a transaction.
///
/// Missing fields deserialize to empty values so that validation, rather than
/// the JSON extractor, decides what the client is told.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// The amount of money earned or spent.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Either "income" or "expense", case-insensitive.
    #[serde(default)]
    pub kind: Option<String>,
    /// The category label.
    #[serde(default)]
    pub category: Option<String>,
    /// When the transaction happened. Defaults to now (UTC).
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    /// Optional free text about the transaction.
    #[serde(default)]
    pub note: Option<String>,
}

/// The largest amount a single transaction may have.
///
/// Keeps the balance summable for any realistic number of transactions.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000_000;

/// Check that `amount` can be stored as a transaction amount.
///
/// # Errors
/// Returns [Error::InvalidInput] if `amount` is zero, negative or greater
/// than [MAX_AMOUNT].
pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal, Error> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidInput(
            "amount must be greater than zero".to_owned(),
        ));
    }

    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(Error::InvalidInput(format!(
            "amount must be at most {MAX_AMOUNT}"
        )));
    }

    Ok(amount)
}

/// Trim `category` and check that something is left.
///
/// # Errors
/// Returns [Error::InvalidInput] if `category` is missing or blank.
pub(crate) fn validate_category(category: Option<&str>) -> Result<String, Error> {
    match category.map(str::trim) {
        Some(category) if !category.is_empty() => Ok(category.to_owned()),
        _ => Err(Error::InvalidInput("category is required".to_owned())),
    }
}

/// Blank notes are stored as no note.
pub(crate) fn normalize_note(note: Option<String>) -> Option<String> {
    note.filter(|note| !note.trim().is_empty())
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Validate `new_transaction` and insert it into the database.
///
/// The kind is lower-cased, the category trimmed, and the date defaults to
/// the current UTC time. Nothing is written if validation fails.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidInput] if the amount is not positive, the kind is invalid,
///   or the category is blank,
/// - or [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let amount = validate_amount(new_transaction.amount)?;
    let kind = parse_kind(new_transaction.kind.as_deref())?;
    let category = validate_category(new_transaction.category.as_deref())?;
    let date = new_transaction.date.unwrap_or_else(OffsetDateTime::now_utc);
    let note = normalize_note(new_transaction.note);

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, kind, category, date, note)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, kind, category, date, note",
        )?
        .query_row(
            (amount.to_string(), kind, category, date, note),
            map_transaction_row,
        )?;

    tracing::debug!("Created transaction {}", transaction.id);

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// Returns `None` if `id` does not refer to a transaction.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, kind, category, date, note FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)
        .optional()?;

    Ok(transaction)
}

/// Remove the transaction with `id` from the database.
///
/// Returns `true` if a row was deleted and `false` if there was no such row.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<bool, Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

    Ok(rows_affected != 0)
}

/// Create the transaction table in the database.
///
/// `AUTOINCREMENT` stops SQLite from handing out the ID of a deleted row again.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                note TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_kind ON \"transaction\"(kind);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, amount, kind, category, date, note` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = get_decimal(row, 1)?;
    let kind = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;
    let note = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        kind,
        category,
        date,
        note,
    })
}

/// Read a decimal stored as text from column `index`.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(index)?;

    Decimal::from_str(&raw).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            Box::new(error),
        )
    })
}

// ============================================================================
// TESTS
// ============================================================================
