//! Loading transactions from the campus card CSV export.

use std::io::Read;

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    transaction::{TransactionRecord, upsert_transaction},
};

/// The outcome of importing a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// The number of rows written to the database.
    pub imported: usize,
}

/// Read transactions from CSV data and save them to the database.
///
/// Rows are matched on their `id`, so importing the same file twice leaves a
/// single copy of each transaction. Dates with a UTC offset are converted to
/// the local time in `canonical_timezone`. All rows are written in one database
/// transaction: if any row is invalid, nothing is saved.
///
/// # Errors
/// Returns a:
/// - [Error::InvalidCSV] if a row cannot be read or its date cannot be parsed,
/// - or [Error::SqlError] if there is an SQL error.
pub fn import_transactions_csv(
    reader: impl Read,
    connection: &mut Connection,
    canonical_timezone: &str,
) -> Result<ImportSummary, Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let sql_transaction = SqlTransaction::new(connection, rusqlite::TransactionBehavior::Immediate)?;
    let mut imported = 0;

    for (row_index, row) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
        // Line 1 is the header.
        let line = row_index + 2;
        let transaction = row
            .map_err(|error| Error::InvalidCSV(format!("line {line}: {error}")))?
            .into_transaction(canonical_timezone)
            .map_err(|error| Error::InvalidCSV(format!("line {line}: {error}")))?;

        upsert_transaction(&transaction, &sql_transaction)?;
        imported += 1;
    }

    sql_transaction.commit()?;
    tracing::info!("Imported {imported} transactions");

    Ok(ImportSummary { imported })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        transaction::{Transaction, count_transactions, get_transactions},
    };

    use super::{ImportSummary, import_transactions_csv};

    const TIMEZONE: &str = "Etc/UTC";

    const CSV: &str = "\
id,user_id,wallet_id,merchant,category,amount,location,date
1,10,100,Dining Hall,Food,-8.75,North Campus,2024-09-07 13:06:41
2,10,100,\"Books, Paper & More\",,-20.00,Library,2024-09-08 09:15:00
";

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn imports_rows() {
        let mut conn = get_test_connection();

        let summary = import_transactions_csv(CSV.as_bytes(), &mut conn, TIMEZONE);

        assert_eq!(summary, Ok(ImportSummary { imported: 2 }));
        assert_eq!(
            get_transactions(&conn),
            Ok(vec![
                Transaction::build(2, -20.0, datetime!(2024-09-08 09:15:00), "Books, Paper & More")
                    .location("Library")
                    .finalise(),
                Transaction::build(1, -8.75, datetime!(2024-09-07 13:06:41), "Dining Hall")
                    .category("Food")
                    .location("North Campus")
                    .finalise(),
            ])
        );
    }

    #[test]
    fn reimporting_merges_by_id() {
        let mut conn = get_test_connection();

        import_transactions_csv(CSV.as_bytes(), &mut conn, TIMEZONE).unwrap();
        import_transactions_csv(CSV.as_bytes(), &mut conn, TIMEZONE).unwrap();

        assert_eq!(count_transactions(&conn), Ok(2));
    }

    #[test]
    fn empty_text_fields_and_offset_dates_are_accepted() {
        let mut conn = get_test_connection();
        let csv = "\
id,user_id,wallet_id,merchant,category,amount,location,date
3,10,100,,,12.00,,2024-09-07T02:00:00Z
";

        let summary = import_transactions_csv(csv.as_bytes(), &mut conn, "Asia/Shanghai");

        assert_eq!(summary, Ok(ImportSummary { imported: 1 }));
        assert_eq!(
            get_transactions(&conn),
            Ok(vec![
                Transaction::build(3, 12.0, datetime!(2024-09-07 10:00:00), "").finalise()
            ])
        );
    }

    #[test]
    fn invalid_date_saves_nothing() {
        let mut conn = get_test_connection();
        let csv = "\
id,user_id,wallet_id,merchant,category,amount,location,date
1,10,100,Dining Hall,Food,-8.75,North Campus,2024-09-07 13:06:41
2,10,100,Cafe,Food,-3.00,Library,yesterday
";

        let result = import_transactions_csv(csv.as_bytes(), &mut conn, TIMEZONE);

        assert!(
            matches!(result, Err(Error::InvalidCSV(ref message)) if message.starts_with("line 3")),
            "want InvalidCSV error for line 3, got {result:?}"
        );
        assert_eq!(count_transactions(&conn), Ok(0));
    }
}
