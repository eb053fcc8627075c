use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    database_id::parse_transaction_id,
    transaction::{TransactionFields, TransactionStore},
};

/// A route handler for updating a transaction, responds with the updated
/// transaction.
///
/// Only the fields present in the body are changed.
pub async fn edit_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(transaction_id): Path<String>,
    Json(fields): Json<TransactionFields>,
) -> Response
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Some(id) = parse_transaction_id(&transaction_id) else {
        return Error::NotFound.into_response();
    };

    match state.transaction_store.update(id, fields) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(Error::NotFound) => {
            tracing::debug!("Tried to update missing transaction {id}");
            Error::NotFound.into_response()
        }
        Err(error) => {
            tracing::error!("Could not update transaction {id}: {error}");
            error.into_response()
        }
    }
}
