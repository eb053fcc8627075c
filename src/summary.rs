//! Computes the income, expense and balance totals over all transactions.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    transaction::{TransactionStore, TransactionType},
};

/// The totals of all recorded transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all income.
    pub income: Decimal,
    /// The sum of all expenses.
    pub expense: Decimal,
    /// Income minus expenses.
    pub balance: Decimal,
}

/// Reduce the per-type totals of `store` to a [Summary].
///
/// Types other than "income" and "expense" are skipped without an error.
///
/// # Errors
/// Returns any error from [TransactionStore::aggregate_by_type], or
/// [Error::AmountOverflow] if the balance does not fit in a [Decimal].
pub fn compute_summary<S>(store: &S) -> Result<Summary, Error>
where
    S: TransactionStore,
{
    let totals = store.aggregate_by_type()?;

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for (kind, total) in totals {
        match kind.as_deref().map(str::parse::<TransactionType>) {
            Some(Ok(TransactionType::Income)) => income = total,
            Some(Ok(TransactionType::Expense)) => expense = total,
            _ => tracing::debug!("Ignoring total {total} for transaction type {kind:?}"),
        }
    }

    let balance = income.checked_sub(expense).ok_or(Error::AmountOverflow)?;

    Ok(Summary {
        income,
        expense,
        balance,
    })
}

/// A route handler for getting the summary of all transactions.
pub async fn get_summary_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Summary>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    compute_summary(&state.transaction_store).map(Json)
}
