//! Defines the endpoint for getting a single transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{Error, database_id::TransactionId};

use super::{core::get_transaction, state::TransactionState};

/// A route handler that responds with the transaction as JSON, or
/// `404 Not Found` if there is no transaction with the ID.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_transaction(transaction_id, &connection) {
        Ok(Some(transaction)) => Json(transaction).into_response(),
        Ok(None) => Error::NotFound.into_response(),
        Err(error) => {
            tracing::error!("Could not get transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
