//! Defines the app level error type and its conversion to HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The body sent to the client when a transaction does not exist.
pub const TRANSACTION_NOT_FOUND: &str = "Transaction not found";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the transaction has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    ///
    /// This is the storage error of the service. It is never retried.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A total of the stored amounts does not fit in a decimal.
    #[error("the total of the transaction amounts is too large to represent")]
    AmountOverflow,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, TRANSACTION_NOT_FOUND).into_response(),
            // The raw error is passed through to the client. Fine for an
            // internal tool, not for a public service.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn other_sql_errors_are_wrapped() {
        let error = Error::from(rusqlite::Error::InvalidQuery);

        assert_eq!(error, Error::SqlError(rusqlite::Error::InvalidQuery));
    }

    #[test]
    fn not_found_is_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_errors_are_500() {
        let sql_response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();
        let lock_response = Error::DatabaseLockError.into_response();
        let overflow_response = Error::AmountOverflow.into_response();

        assert_eq!(sql_response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(lock_response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(overflow_response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
