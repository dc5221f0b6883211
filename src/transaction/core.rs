//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    Error,
    transaction::timestamp::{format_timestamp, serde_timestamp, try_parse},
};

/// The label used for transactions without a category.
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// The identifier of a transaction, unique within a batch of transactions.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// A payment made with, or a top-up of, the campus card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Where the money was spent or where it came from.
    pub merchant: String,
    /// The category of the transaction, e.g. "Food" or "Books".
    #[serde(default)]
    pub category: Option<String>,
    /// The amount of money that moved.
    ///
    /// Negative amounts are money out and positive amounts are money in.
    pub amount: f64,
    /// Where the transaction took place.
    pub location: String,
    /// When the transaction happened, in local time.
    #[serde(with = "serde_timestamp")]
    pub date: PrimitiveDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// The category and location default to empty and can be set on the
    /// returned builder.
    pub fn build(
        id: TransactionId,
        amount: f64,
        date: PrimitiveDateTime,
        merchant: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id,
            merchant: merchant.to_owned(),
            category: None,
            amount,
            location: String::new(),
            date,
        }
    }

    /// The category used for grouping, "Other" when the category is missing or empty.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => UNCATEGORIZED_LABEL,
        }
    }
}

/// A builder for [Transaction] values.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    id: TransactionId,
    merchant: String,
    category: Option<String>,
    amount: f64,
    location: String,
    date: PrimitiveDateTime,
}

impl TransactionBuilder {
    /// Set the category of the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Set where the transaction took place.
    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_owned();
        self
    }

    /// Create the transaction.
    pub fn finalise(self) -> Transaction {
        Transaction {
            id: self.id,
            merchant: self.merchant,
            category: self.category,
            amount: self.amount,
            location: self.location,
            date: self.date,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert `transaction`, replacing any stored transaction with the same ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn upsert_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (id, merchant, category, amount, location, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            merchant = excluded.merchant,
            category = excluded.category,
            amount = excluded.amount,
            location = excluded.location,
            date = excluded.date",
        (
            transaction.id,
            &transaction.merchant,
            &transaction.category,
            transaction.amount,
            &transaction.location,
            format_timestamp(transaction.date),
        ),
    )?;

    Ok(())
}

/// Get all transactions, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, merchant, category, amount, location, date FROM \"transaction\"
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Get the `limit` most recent transactions, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_recent_transactions(limit: u32, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, merchant, category, amount, location, date FROM \"transaction\"
             ORDER BY date DESC, id DESC
             LIMIT :limit",
        )?
        .query_map(&[(":limit", &limit)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                merchant TEXT NOT NULL,
                category TEXT,
                amount REAL NOT NULL,
                location TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Recent transactions are listed by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Drop the transaction table and everything in it.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn drop_transaction_table(connection: &Connection) -> Result<(), Error> {
    connection.execute("DROP TABLE IF EXISTS \"transaction\"", ())?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let merchant = row.get(1)?;
    let category = row.get(2)?;
    let amount = row.get(3)?;
    let location = row.get(4)?;
    let date: String = row.get(5)?;
    let date = try_parse(&date).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id,
        merchant,
        category,
        amount,
        location,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod model_tests {
    use time::macros::datetime;

    use crate::transaction::Transaction;

    #[test]
    fn category_label_falls_back_to_other() {
        let date = datetime!(2024-09-07 13:06:41);
        let missing = Transaction::build(1, -4.5, date, "Cafe").finalise();
        let empty = Transaction::build(2, -4.5, date, "Cafe")
            .category("")
            .finalise();
        let food = Transaction::build(3, -4.5, date, "Cafe")
            .category("Food")
            .finalise();

        assert_eq!(missing.category_label(), "Other");
        assert_eq!(empty.category_label(), "Other");
        assert_eq!(food.category_label(), "Food");
    }

    #[test]
    fn deserializes_json_with_missing_category() {
        let json = r#"{
            "id": 7,
            "merchant": "Campus Store",
            "amount": -12.5,
            "location": "Student Union",
            "date": "2024-09-07T13:06:41.500000"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(
            transaction,
            Transaction::build(7, -12.5, datetime!(2024-09-07 13:06:41), "Campus Store")
                .location("Student Union")
                .finalise()
        );
    }

    #[test]
    fn serializes_date_without_fraction() {
        let transaction = Transaction::build(1, 10.0, datetime!(2024-01-01 09:30:00), "Top Up")
            .category("Deposit")
            .finalise();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["date"], "2024-01-01T09:30:00");
        assert_eq!(json["category"], "Deposit");
    }
}
