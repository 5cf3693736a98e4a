//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{Error, database_id::TransactionId};

use super::{core::delete_transaction, state::TransactionState};

/// A route handler for deleting a transaction.
///
/// Responds with `204 No Content`, or `404 Not Found` if there is no
/// transaction with the ID.
pub async fn delete_transaction_endpoint(
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

    match delete_transaction(transaction_id, &connection) {
        Ok(true) => {
            tracing::info!("Deleted transaction {transaction_id}");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => Error::NotFound.into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
