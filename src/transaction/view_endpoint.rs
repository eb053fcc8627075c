//! Defines the endpoints for reading transactions.
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    database_id::parse_transaction_id,
    transaction::TransactionStore,
};

/// A route handler that responds with every stored transaction.
pub async fn get_transactions_endpoint<S>(State(state): State<AppState<S>>) -> Response
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    match state.transaction_store.list() {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("Could not list transactions: {error}");
            error.into_response()
        }
    }
}

/// A route handler that responds with a single transaction, or
/// `404 Not Found` if the ID does not refer to a transaction.
pub async fn get_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_id): Path<String>,
) -> Response
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Some(id) = parse_transaction_id(&transaction_id) else {
        return Error::NotFound.into_response();
    };

    match state.transaction_store.get(id) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(Error::NotFound) => Error::NotFound.into_response(),
        Err(error) => {
            tracing::error!("Could not get transaction {id}: {error}");
            error.into_response()
        }
    }
}
