use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, initialize_db, transaction::SQLiteTransactionStore};

#[track_caller]
pub(crate) fn must_create_test_store() -> SQLiteTransactionStore {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize_db(&connection).expect("could not initialize test DB");

    SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
}

#[track_caller]
pub(crate) fn must_create_test_state() -> AppState<SQLiteTransactionStore> {
    AppState::new(must_create_test_store())
}
