//! CSV export of the selected transactions.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{
    Error,
    transaction::{Transaction, format_timestamp},
};

/// The header row of exported files.
pub const EXPORT_HEADER: &str = "id,date,merchant,category,location,amount";

/// The name suggested to the browser for exported files.
pub const EXPORT_FILE_NAME: &str = "transactions.csv";

/// Write `transactions` as CSV, one row per transaction after the header.
///
/// Every field is quoted, so text that looks like a number stays text, and
/// embedded quotes are doubled. Amounts are written with two decimal places
/// and dates as full timestamps.
///
/// # Errors
/// Returns [Error::ExportError] if a row cannot be written.
pub fn export_csv(transactions: &[&Transaction]) -> Result<String, Error> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(EXPORT_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for transaction in transactions {
        writer
            .write_record([
                transaction.id.to_string(),
                format_timestamp(transaction.date),
                transaction.merchant.clone(),
                transaction.category.clone().unwrap_or_default(),
                transaction.location.clone(),
                format!("{:.2}", transaction.amount),
            ])
            .map_err(|error| Error::ExportError(error.to_string()))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|error| Error::ExportError(error.to_string()))?;

    String::from_utf8(buffer).map_err(|error| Error::ExportError(error.to_string()))
}
