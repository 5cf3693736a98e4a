use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{initialize_db, transaction::TransactionState};

#[track_caller]
pub(crate) fn must_create_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize_db(&connection).expect("could not initialize test DB");

    connection
}

pub(crate) fn must_create_test_state() -> TransactionState {
    TransactionState {
        db_connection: Arc::new(Mutex::new(must_create_test_connection())),
    }
}
