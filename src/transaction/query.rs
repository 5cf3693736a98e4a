//! Filtered queries over the transaction table.

use rusqlite::{Connection, ToSql};

use crate::Error;

use super::core::{Transaction, TransactionKind, map_transaction_row};

/// Constraints on which transactions to list.
///
/// An empty filter matches every transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Only match transactions of this kind.
    pub kind: Option<TransactionKind>,
    /// Only match transactions in this category, ignoring case.
    pub category: Option<String>,
}

impl TransactionFilter {
    /// Build a filter from raw query string values.
    ///
    /// Missing or blank values impose no constraint. The category is trimmed.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if `kind` is given but is not a valid kind.
    pub fn parse(kind: Option<&str>, category: Option<&str>) -> Result<Self, Error> {
        let kind = match kind.map(str::trim) {
            Some(kind) if !kind.is_empty() => Some(kind.parse()?),
            _ => None,
        };

        let category = category
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(str::to_owned);

        Ok(Self { kind, category })
    }
}

/// Get the transactions matching `filter`, ordered by ascending ID.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn list_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut clauses = Vec::new();
    let mut params: Vec<(&str, &dyn ToSql)> = Vec::new();

    if let Some(kind) = &filter.kind {
        clauses.push("kind = :kind");
        params.push((":kind", kind as &dyn ToSql));
    }

    if let Some(category) = &filter.category {
        clauses.push("fold_case(category) = fold_case(:category)");
        params.push((":category", category as &dyn ToSql));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let query = format!(
        "SELECT id, amount, kind, category, date, note FROM \"transaction\" \
        {where_clause} \
        ORDER BY id ASC"
    );

    connection
        .prepare(&query)?
        .query_map(params.as_slice(), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod filter_tests {
    use crate::{
        Error,
        transaction::{TransactionFilter, TransactionKind},
    };

    #[test]
    fn empty_values_impose_no_constraint() {
        assert_eq!(
            TransactionFilter::parse(None, Some("  ")),
            Ok(TransactionFilter::default())
        );
        assert_eq!(
            TransactionFilter::parse(Some(""), None),
            Ok(TransactionFilter::default())
        );
    }

    #[test]
    fn normalizes_values() {
        assert_eq!(
            TransactionFilter::parse(Some("EXPENSE"), Some(" Food ")),
            Ok(TransactionFilter {
                kind: Some(TransactionKind::Expense),
                category: Some("Food".to_owned()),
            })
        );
    }

    #[test]
    fn rejects_invalid_kind() {
        assert!(matches!(
            TransactionFilter::parse(Some("cash"), None),
            Err(Error::InvalidInput(_))
        ));
    }
}
