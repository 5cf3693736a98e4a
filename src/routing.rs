//! Application router configuration.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState, Error,
    balance::get_balance_endpoint,
    db::check_connection,
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(endpoints::DB_TEST, get(get_db_test))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(endpoints::BALANCE, get(get_balance_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' reports that the server is up.
async fn get_index() -> &'static str {
    "Personal Finance API is running"
}

/// Check that the database can be queried.
async fn get_db_test(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match check_connection(&connection) {
        Ok(()) => (StatusCode::OK, "Connected to the database!").into_response(),
        Err(error) => {
            tracing::error!("Database check failed: {error}");
            error.into_response()
        }
    }
}
