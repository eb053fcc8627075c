//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a [Transaction](crate::transaction::Transaction).
pub type TransactionId = DatabaseId;

/// Parse a transaction ID taken from a request path.
///
/// IDs are opaque to clients, so any text that is not a valid row ID is
/// treated as an ID that does not exist rather than as a malformed request.
pub fn parse_transaction_id(raw_id: &str) -> Option<TransactionId> {
    raw_id.trim().parse().ok()
}
