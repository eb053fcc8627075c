//! Defines the transaction store trait and its SQLite implementation.

use std::{
    collections::BTreeMap,
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, params, types::Type};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionFields},
};

/// The summed amount of each distinct transaction type.
///
/// Keys are the raw type text as stored, `None` groups the transactions that
/// have no type.
pub type TypeTotals = BTreeMap<Option<String>, Decimal>;

/// Handles the creation, retrieval, modification and deletion of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// If `fields` has no date, the current time is used.
    fn insert(&self, fields: TransactionFields) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve every transaction in the store.
    fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// Replace the fields that are set in `fields` and return the updated
    /// transaction. Fields that are not set keep their current value.
    fn update(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error>;

    /// Remove a transaction from the store.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;

    /// Group every transaction by its type and sum the amounts of each group.
    fn aggregate_by_type(&self) -> Result<TypeTotals, Error>;
}

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The transaction table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

const SELECT_COLUMNS: &str = "id, type, category, amount, date, description";

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn insert(&self, fields: TransactionFields) -> Result<Transaction, Error> {
        let date = fields.date.unwrap_or_else(OffsetDateTime::now_utc);

        let transaction = self
            .lock()?
            .prepare(&format!(
                "INSERT INTO \"transaction\" (type, category, amount, date, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {SELECT_COLUMNS}"
            ))?
            .query_row(
                params![
                    fields.kind,
                    fields.category,
                    fields.amount.map(|amount| amount.to_string()),
                    date,
                    fields.description,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Retrieve all transactions in the order they were created.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM \"transaction\" ORDER BY id ASC"
            ))?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Update a transaction in a single statement so that concurrent
    /// requests never see a half-applied update.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET \
                    type = COALESCE(?1, type), \
                    category = COALESCE(?2, category), \
                    amount = COALESCE(?3, amount), \
                    date = COALESCE(?4, date), \
                    description = COALESCE(?5, description) \
                 WHERE id = ?6
                 RETURNING {SELECT_COLUMNS}"
            ))?
            .query_row(
                params![
                    fields.kind,
                    fields.category,
                    fields.amount.map(|amount| amount.to_string()),
                    fields.date,
                    fields.description,
                    id,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Delete a transaction from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self.lock()?.execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }

    /// Sum the amounts per transaction type.
    ///
    /// Amounts are stored as decimal text, summing them in SQL would go
    /// through floating point so the grouping is done here instead.
    /// Transactions without an amount still create their group.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::AmountOverflow] if a group's total does not fit in a [Decimal],
    /// - or [Error::SqlError] there is a SQL error.
    fn aggregate_by_type(&self) -> Result<TypeTotals, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare("SELECT type, amount FROM \"transaction\"")?;
        let rows = statement.query_map([], |row| {
            let kind: Option<String> = row.get(0)?;
            let amount = get_amount(row, 1)?;

            Ok((kind, amount))
        })?;

        let mut totals = TypeTotals::new();

        for row in rows {
            let (kind, amount) = row?;
            let total = totals.entry(kind).or_insert(Decimal::ZERO);

            if let Some(amount) = amount {
                *total = total.checked_add(amount).ok_or(Error::AmountOverflow)?;
            }
        }

        Ok(totals)
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT,
                category TEXT,
                amount TEXT,
                date TEXT NOT NULL,
                description TEXT
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT INTO sqlite_sequence (name, seq)
            SELECT 'transaction', 0
            WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'transaction')",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_type ON \"transaction\"(type);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order of `SELECT_COLUMNS`.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let category = row.get(2)?;
    let amount = get_amount(row, 3)?;
    let date = row.get(4)?;
    let description = row.get(5)?;

    Ok(Transaction {
        id,
        kind,
        category,
        amount,
        date,
        description,
    })
}

fn get_amount(row: &Row, index: usize) -> Result<Option<Decimal>, rusqlite::Error> {
    let raw_amount: Option<String> = row.get(index)?;

    raw_amount
        .map(|raw_amount| {
            Decimal::from_str(&raw_amount).map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
            })
        })
        .transpose()
}
