//! Database setup and health checks.

use rusqlite::{Connection, functions::FunctionFlags};

use crate::{Error, transaction::create_transaction_table};

/// Create the application's tables if they do not already exist and register
/// the SQL functions the queries rely on.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an [Error::SqlError] if a table or function cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_functions(connection)?;

    let transaction = connection.unchecked_transaction()?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Register `fold_case(text)`, which lower-cases text with Unicode rules since
/// SQLite's built-in `LOWER` only folds ASCII letters.
///
/// Functions are registered per connection, so this must be called for every
/// new connection.
fn register_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text: String = context.get(0)?;
            Ok(text.to_lowercase())
        },
    )
}

/// Run a trivial query to check that the database can be reached.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn check_connection(connection: &Connection) -> Result<(), Error> {
    connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::{check_connection, initialize};

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(initialize(&connection), Ok(()));
        assert_eq!(initialize(&connection), Ok(()));
    }

    #[test]
    fn fold_case_lowers_non_ascii_letters() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let got: String = connection
            .query_row("SELECT fold_case('CAFÉ Ünïcode')", [], |row| row.get(0))
            .unwrap();

        assert_eq!(got, "café ünïcode");
    }

    #[test]
    fn check_connection_succeeds() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(check_connection(&connection), Ok(()));
    }
}
