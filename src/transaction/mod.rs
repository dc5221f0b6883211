//! Transactions: the data model, storage, CSV import and the JSON API.

mod core;
mod import;
mod list_endpoint;
mod record;
mod timestamp;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, count_transactions, create_transaction_table,
    drop_transaction_table, get_recent_transactions, get_transactions, upsert_transaction,
};
pub use import::{ImportSummary, import_transactions_csv};
pub use list_endpoint::{
    RECENT_TRANSACTION_LIMIT, get_recent_transactions_endpoint, get_transactions_endpoint,
};
pub use record::TransactionRecord;
pub use timestamp::{format_timestamp, parse_timestamp};
