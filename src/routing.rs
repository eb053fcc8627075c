//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    not_found::get_404_not_found,
    summary::get_summary_endpoint,
    transaction::{
        TransactionStore, create_transaction_endpoint, delete_transaction_endpoint,
        edit_transaction_endpoint, get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint::<S>).get(get_transactions_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<S>)
                .put(edit_transaction_endpoint::<S>)
                .delete(delete_transaction_endpoint::<S>),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint::<S>))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        endpoints::{self, format_endpoint},
        error::TRANSACTION_NOT_FOUND,
        summary::Summary,
        transaction::{
            TRANSACTION_DELETED, Transaction, TransactionFields,
            test_utils::must_create_test_state,
        },
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let app = build_router(must_create_test_state());

        TestServer::try_new(app).expect("Could not create test server.")
    }

    async fn create(server: &TestServer, body: serde_json::Value) -> Transaction {
        let response = server.post(endpoints::TRANSACTIONS).json(&body).await;
        response.assert_status(StatusCode::CREATED);

        response.json::<Transaction>()
    }

    #[tokio::test]
    async fn create_then_get_returns_same_transaction() {
        let server = get_test_server();
        let created = create(
            &server,
            json!({
                "type": "expense",
                "category": "Groceries",
                "amount": 45.5,
                "date": "2025-10-05T09:30:00Z",
                "description": "Weekly shop",
            }),
        )
        .await;

        let got = server
            .get(&format_endpoint(endpoints::TRANSACTION, created.id))
            .await;

        got.assert_status_ok();
        let got = got.json::<Transaction>();
        assert_eq!(got, created);
        assert_eq!(got.kind.as_deref(), Some("expense"));
        assert_eq!(got.category.as_deref(), Some("Groceries"));
        assert_eq!(got.amount, Some(Decimal::new(455, 1)));
        assert_eq!(got.date, datetime!(2025-10-05 09:30 UTC));
        assert_eq!(got.description.as_deref(), Some("Weekly shop"));
    }

    #[tokio::test]
    async fn create_without_date_uses_current_time() {
        let server = get_test_server();

        let created = create(&server, json!({ "type": "income", "amount": 10 })).await;

        let age = time::OffsetDateTime::now_utc() - created.date;
        assert!(age.abs() < time::Duration::seconds(5), "got date {}", created.date);
    }

    #[tokio::test]
    async fn create_rejects_wrongly_shaped_body() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "amount": "not a number" }))
            .expect_failure()
            .await;

        assert!(
            response.status_code().is_client_error(),
            "want 4xx, got {}",
            response.status_code()
        );
    }

    #[tokio::test]
    async fn list_returns_every_transaction() {
        let server = get_test_server();
        let want = vec![
            create(&server, json!({ "type": "income", "amount": 100 })).await,
            create(&server, json!({ "type": "expense", "amount": 40 })).await,
        ];

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Transaction>>(), want);
    }

    #[tokio::test]
    async fn get_missing_transaction_is_not_found() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, 42))
            .expect_failure()
            .await;

        response.assert_status_not_found();
        response.assert_text(TRANSACTION_NOT_FOUND);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let server = get_test_server();
        let created = create(
            &server,
            json!({
                "type": "expense",
                "category": "Rent",
                "amount": 1200,
                "description": "October rent",
            }),
        )
        .await;

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, created.id))
            .json(&TransactionFields::default().amount(Decimal::from(1250)))
            .await;

        response.assert_status_ok();
        let want = Transaction {
            amount: Some(Decimal::from(1250)),
            ..created
        };
        assert_eq!(response.json::<Transaction>(), want);
    }

    #[tokio::test]
    async fn update_missing_transaction_is_not_found() {
        let server = get_test_server();

        server
            .put(&format_endpoint(endpoints::TRANSACTION, 42))
            .json(&json!({ "amount": 1 }))
            .expect_failure()
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let server = get_test_server();
        let created = create(&server, json!({ "type": "income", "amount": 5 })).await;
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        let response = server.delete(&path).await;

        response.assert_status_ok();
        response.assert_text(TRANSACTION_DELETED);
        server
            .get(&path)
            .expect_failure()
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let server = get_test_server();

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, 42))
            .expect_failure()
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn summary_of_empty_store_is_zero() {
        let server = get_test_server();

        let response = server.get(endpoints::SUMMARY).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Summary>(), Summary::default());
    }

    #[tokio::test]
    async fn summary_totals_income_and_expense() {
        let server = get_test_server();
        create(&server, json!({ "type": "income", "amount": 100 })).await;
        create(&server, json!({ "type": "expense", "amount": 40 })).await;
        create(&server, json!({ "type": "transfer", "amount": 500 })).await;

        let response = server.get(endpoints::SUMMARY).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Summary>(),
            Summary {
                income: Decimal::from(100),
                expense: Decimal::from(40),
                balance: Decimal::from(60),
            }
        );
    }

    #[tokio::test]
    async fn summary_overflow_keeps_service_running() {
        let server = get_test_server();
        create(&server, json!({ "type": "income", "amount": 5e28 })).await;
        create(&server, json!({ "type": "income", "amount": 5e28 })).await;

        server
            .get(endpoints::SUMMARY)
            .expect_failure()
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let response = server.get(endpoints::TRANSACTIONS).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Transaction>>().len(), 2);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/categories")
            .expect_failure()
            .await
            .assert_status_not_found();
    }
}
