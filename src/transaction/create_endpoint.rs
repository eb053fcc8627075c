//! Defines the endpoint for creating a new transaction.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    transaction::{TransactionFields, TransactionStore},
};

/// A route handler for creating a new transaction, responds with the stored
/// transaction and `201 Created`.
///
/// The body is not validated beyond its JSON shape, every field may be
/// omitted.
pub async fn create_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Json(fields): Json<TransactionFields>,
) -> Response
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    match state.transaction_store.insert(fields) {
        Ok(transaction) => {
            tracing::debug!("Created transaction {}", transaction.id);
            (StatusCode::CREATED, Json(transaction)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, body::to_bytes, extract::State, http::StatusCode};
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::transaction::{
        Transaction, TransactionFields, TransactionStore, test_utils::must_create_test_state,
    };

    use super::create_transaction_endpoint;

    #[tokio::test]
    async fn can_create_transaction() {
        let state = must_create_test_state();
        let fields = TransactionFields::default()
            .kind("income")
            .category("Salary")
            .amount(Decimal::from(2500))
            .date(datetime!(2025-10-01 08:00 UTC))
            .description("October pay");

        let response = create_transaction_endpoint(State(state.clone()), Json(fields)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");
        let got: Transaction =
            serde_json::from_slice(&body).expect("could not parse response body");
        assert_eq!(state.transaction_store.get(got.id), Ok(got));
    }

    #[tokio::test]
    async fn stores_transaction_with_no_fields() {
        let state = must_create_test_state();

        let response =
            create_transaction_endpoint(State(state.clone()), Json(TransactionFields::default()))
                .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(state.transaction_store.list().map(|all| all.len()), Ok(1));
    }
}
