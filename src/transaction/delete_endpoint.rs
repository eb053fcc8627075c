use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, database_id::parse_transaction_id, transaction::TransactionStore,
};

/// The body sent to the client after a transaction is deleted.
pub const TRANSACTION_DELETED: &str = "Transaction deleted";

/// A route handler for deleting a transaction, responds with a short
/// confirmation message.
pub async fn delete_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_id): Path<String>,
) -> Response
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Some(id) = parse_transaction_id(&transaction_id) else {
        return Error::NotFound.into_response();
    };

    match state.transaction_store.delete(id) {
        Ok(()) => (StatusCode::OK, TRANSACTION_DELETED).into_response(),
        Err(Error::NotFound) => Error::NotFound.into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {id}: {error}");
            error.into_response()
        }
    }
}
