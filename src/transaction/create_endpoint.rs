//! Defines the endpoint for creating a transaction.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    endpoints::{self, format_endpoint},
};

use super::{
    core::{NewTransaction, create_transaction},
    state::TransactionState,
};

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created`, the new transaction as JSON and its URI in the
/// `Location` header, or `400 Bad Request` if the transaction is invalid.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => {
            let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

            (StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response()
        }
        Err(error @ Error::InvalidInput(_)) => {
            tracing::debug!("Rejected new transaction: {error}");
            error.into_response()
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_response()
        }
    }
}
