//! Defines the endpoint for updating a transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{Error, database_id::TransactionId};

use super::{
    patch::{TransactionPatch, update_transaction},
    state::TransactionState,
};

/// A route handler for partially updating a transaction.
///
/// Only the fields present in the request body are changed. Sending `"note":
/// null` removes the note. Responds with the updated transaction as JSON,
/// `400 Bad Request` if a field is invalid or `404 Not Found` if there is no
/// transaction with the ID.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(patch): Json<TransactionPatch>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_transaction(transaction_id, patch, &connection) {
        Ok(Some(transaction)) => Json(transaction).into_response(),
        Ok(None) => Error::NotFound.into_response(),
        Err(error @ Error::InvalidInput(_)) => {
            tracing::debug!("Rejected update to transaction {transaction_id}: {error}");
            error.into_response()
        }
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rust_decimal_macros::dec;
    use serde_json::Value;

    use crate::{
        test_utils::{assert_status, must_create_test_state, parse_json_body},
        transaction::{
            NewTransaction, Patch, Transaction, TransactionPatch, create_transaction,
            get_transaction,
        },
    };

    use super::update_transaction_endpoint;

    fn insert_test_transaction(state: &crate::transaction::TransactionState) -> Transaction {
        create_transaction(
            NewTransaction {
                amount: dec!(12),
                kind: Some("expense".to_owned()),
                category: Some("Lunch".to_owned()),
                note: Some("Sushi".to_owned()),
                ..Default::default()
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let state = must_create_test_state();
        let original = insert_test_transaction(&state);

        let response = update_transaction_endpoint(
            State(state.clone()),
            Path(original.id),
            Json(TransactionPatch {
                amount: Patch::Set(dec!(15.50)),
                note: Patch::Clear,
                ..Default::default()
            }),
        )
        .await;

        assert_status(&response, StatusCode::OK);
        let got: Transaction = parse_json_body(response).await;
        let want = Transaction {
            amount: dec!(15.50),
            note: None,
            ..original
        };
        assert_eq!(got, want);
        assert_eq!(
            get_transaction(want.id, &state.db_connection.lock().unwrap()).unwrap(),
            Some(want)
        );
    }

    #[tokio::test]
    async fn invalid_update_is_bad_request() {
        let state = must_create_test_state();
        let original = insert_test_transaction(&state);

        let response = update_transaction_endpoint(
            State(state),
            Path(original.id),
            Json(TransactionPatch {
                kind: Patch::Set("cash".to_owned()),
                ..Default::default()
            }),
        )
        .await;

        assert_status(&response, StatusCode::BAD_REQUEST);
        let body: Value = parse_json_body(response).await;
        assert_eq!(body["error"], "kind must be 'income' or 'expense'");
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = must_create_test_state();

        let response = update_transaction_endpoint(
            State(state),
            Path(7),
            Json(TransactionPatch::default()),
        )
        .await;

        assert_status(&response, StatusCode::NOT_FOUND);
    }
}
