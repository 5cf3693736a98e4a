//! Partial updates to transactions.

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

use super::core::{
    Transaction, get_transaction, normalize_note, parse_kind, validate_amount, validate_category,
};

/// A field in an update request.
///
/// JSON cannot tell a missing field apart from a null one once it has been
/// read into an `Option`, so each field keeps all three states.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// The field was not sent, keep the stored value.
    Absent,
    /// The field was sent as null.
    Clear,
    /// The field was sent with a new value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        }
    }
}

// Only called when the field is present, missing fields use `Default`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from_option)
    }
}

fn deserialize_amount_patch<'de, D>(deserializer: D) -> Result<Patch<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    rust_decimal::serde::arbitrary_precision_option::deserialize(deserializer)
        .map(Patch::from_option)
}

fn deserialize_date_patch<'de, D>(deserializer: D) -> Result<Patch<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::option::deserialize(deserializer).map(Patch::from_option)
}

/// The changes to make to a transaction.
///
/// Fields left as [Patch::Absent] are not changed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionPatch {
    /// The new amount, must be greater than zero.
    #[serde(default, deserialize_with = "deserialize_amount_patch")]
    pub amount: Patch<Decimal>,
    /// The new kind, "income" or "expense" in any case.
    #[serde(default)]
    pub kind: Patch<String>,
    /// The new category, must not be blank.
    #[serde(default)]
    pub category: Patch<String>,
    /// The new date.
    #[serde(default, deserialize_with = "deserialize_date_patch")]
    pub date: Patch<OffsetDateTime>,
    /// The new note, [Patch::Clear] removes the note.
    #[serde(default)]
    pub note: Patch<String>,
}

/// Apply `patch` to `transaction`, validating every supplied field.
///
/// # Errors
/// Returns [Error::InvalidInput] if a supplied field is invalid, or if a
/// required field is sent as null.
fn apply_patch(mut transaction: Transaction, patch: TransactionPatch) -> Result<Transaction, Error> {
    match patch.amount {
        Patch::Absent => {}
        Patch::Clear => return Err(cannot_clear("amount")),
        Patch::Set(amount) => transaction.amount = validate_amount(amount)?,
    }

    match patch.kind {
        Patch::Absent => {}
        Patch::Clear => return Err(cannot_clear("kind")),
        Patch::Set(kind) => transaction.kind = parse_kind(Some(&kind))?,
    }

    match patch.category {
        Patch::Absent => {}
        Patch::Clear => return Err(cannot_clear("category")),
        Patch::Set(category) => transaction.category = validate_category(Some(&category))?,
    }

    match patch.date {
        Patch::Absent => {}
        Patch::Clear => return Err(cannot_clear("date")),
        Patch::Set(date) => transaction.date = date,
    }

    match patch.note {
        Patch::Absent => {}
        Patch::Clear => transaction.note = None,
        Patch::Set(note) => transaction.note = normalize_note(Some(note)),
    }

    Ok(transaction)
}

fn cannot_clear(field: &str) -> Error {
    Error::InvalidInput(format!("{field} cannot be null"))
}

/// Update the transaction with `id` using the fields supplied in `patch`.
///
/// Returns `None`, without writing anything, if there is no transaction with
/// `id`. Otherwise the whole row is rewritten with the merged values.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidInput] if a supplied field is invalid,
/// - or [Error::SqlError] if there is some SQL error.
pub fn update_transaction(
    id: TransactionId,
    patch: TransactionPatch,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    let Some(existing) = get_transaction(id, connection)? else {
        return Ok(None);
    };

    let transaction = apply_patch(existing, patch)?;

    connection.execute(
        "UPDATE \"transaction\"
        SET \
            amount = ?1, \
            kind = ?2, \
            category = ?3, \
            date = ?4, \
            note = ?5 \
        WHERE id = ?6;",
        params![
            transaction.amount.to_string(),
            transaction.kind,
            transaction.category,
            transaction.date,
            transaction.note,
            id,
        ],
    )?;

    tracing::debug!("Updated transaction {id}");

    Ok(Some(transaction))
}

#[cfg(test)]
mod deserialize_tests {
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use super::{Patch, TransactionPatch};

    #[test]
    fn distinguishes_missing_null_and_value() {
        let patch: TransactionPatch = serde_json::from_str(
            r#"{"amount": "12.50", "note": null, "date": "2025-01-02T03:04:05Z"}"#,
        )
        .unwrap();

        assert_eq!(
            patch,
            TransactionPatch {
                amount: Patch::Set(dec!(12.50)),
                kind: Patch::Absent,
                category: Patch::Absent,
                date: Patch::Set(datetime!(2025-01-02 03:04:05 UTC)),
                note: Patch::Clear,
            }
        );
    }

    #[test]
    fn reads_amount_without_rounding() {
        let patch: TransactionPatch =
            serde_json::from_str(r#"{"amount": 12345678901234567.89}"#).unwrap();

        assert_eq!(patch.amount, Patch::Set(dec!(12345678901234567.89)));
    }

    #[test]
    fn null_amount_is_clear() {
        let patch: TransactionPatch = serde_json::from_str(r#"{"amount": null}"#).unwrap();

        assert_eq!(patch.amount, Patch::Clear);
    }

    #[test]
    fn empty_object_changes_nothing() {
        let patch: TransactionPatch = serde_json::from_str("{}").unwrap();

        assert_eq!(patch, TransactionPatch::default());
    }

    #[test]
    fn null_date_is_clear() {
        let patch: TransactionPatch = serde_json::from_str(r#"{"date": null}"#).unwrap();

        assert_eq!(patch.date, Patch::Clear);
    }
}
