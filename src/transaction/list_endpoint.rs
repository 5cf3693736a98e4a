//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::Error;

use super::{
    query::{TransactionFilter, list_transactions},
    state::TransactionState,
};

/// The query string accepted by [list_transactions_endpoint].
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only list transactions of this kind.
    pub kind: Option<String>,
    /// Only list transactions in this category, ignoring case.
    pub category: Option<String>,
}

/// A route handler that responds with the transactions matching the query as
/// a JSON array, ordered by ID.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let filter = match TransactionFilter::parse(query.kind.as_deref(), query.category.as_deref())
    {
        Ok(filter) => filter,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match list_transactions(&filter, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("Could not list transactions with {filter:?}: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use rust_decimal_macros::dec;

    use crate::{
        test_utils::{assert_status, must_create_test_state, parse_json_body},
        transaction::{NewTransaction, Transaction, TransactionKind, create_transaction},
    };

    use super::{ListQuery, list_transactions_endpoint};

    fn insert_test_transactions(state: &crate::transaction::TransactionState) {
        let connection = state.db_connection.lock().unwrap();
        for (kind, category) in [("income", "Salary"), ("expense", "Food"), ("income", "Gift")] {
            create_transaction(
                NewTransaction {
                    amount: dec!(1),
                    kind: Some(kind.to_owned()),
                    category: Some(category.to_owned()),
                    ..Default::default()
                },
                &connection,
            )
            .unwrap();
        }
    }

    #[tokio::test]
    async fn lists_all_transactions() {
        let state = must_create_test_state();
        insert_test_transactions(&state);

        let response =
            list_transactions_endpoint(State(state), Query(ListQuery::default())).await;

        assert_status(&response, StatusCode::OK);
        let got: Vec<Transaction> = parse_json_body(response).await;
        let ids: Vec<i64> = got.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn filters_by_kind() {
        let state = must_create_test_state();
        insert_test_transactions(&state);

        let response = list_transactions_endpoint(
            State(state),
            Query(ListQuery {
                kind: Some("INCOME".to_owned()),
                category: None,
            }),
        )
        .await;

        let got: Vec<Transaction> = parse_json_body(response).await;
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|t| t.kind == TransactionKind::Income));
    }

    #[tokio::test]
    async fn invalid_kind_is_bad_request() {
        let state = must_create_test_state();

        let response = list_transactions_endpoint(
            State(state),
            Query(ListQuery {
                kind: Some("cash".to_owned()),
                category: None,
            }),
        )
        .await;

        assert_status(&response, StatusCode::BAD_REQUEST);
    }
}
