//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

/// The root route which reports that the API is running.
pub const ROOT: &str = "/";
/// The route for checking that the database can be reached.
pub const DB_TEST: &str = "/db-test";
/// The route to access transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route for the income, expense and balance totals.
pub const BALANCE: &str = "/balance";

/// Replace the `{...}` parameter in `endpoint_path` with `id`.
///
/// Only the first parameter is replaced. If `endpoint_path` has no parameter
/// it is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| start + offset + 1);

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}
