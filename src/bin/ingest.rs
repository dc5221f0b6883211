use std::{error::Error, fs::File, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;

use campus_card::{
    count_transactions, drop_transaction_table, import_transactions_csv, initialize_db,
};

/// Load a campus card transaction export into the app's SQLite database.
///
/// Rows are merged by ID, so loading the same export twice leaves one copy of
/// each transaction.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "CAMPUS_CARD_DB_PATH")]
    db_path: String,

    /// File path to the exported `transaction.csv`.
    #[arg(long, short)]
    csv_path: String,

    /// The canonical name of the local timezone, e.g. "Asia/Shanghai".
    ///
    /// Dates in the export with a UTC offset are converted to this timezone.
    #[arg(long, env = "CAMPUS_CARD_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Delete all stored transactions before loading the export.
    #[arg(long)]
    reset: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let csv_path = Path::new(&args.csv_path);
    if !csv_path.is_file() {
        eprintln!("Could not find a CSV file at {csv_path:#?}");
        exit(1);
    }

    let mut conn = Connection::open(&args.db_path)?;

    if args.reset {
        println!("Dropping existing transactions...");
        drop_transaction_table(&conn)?;
    }

    initialize_db(&conn)?;

    println!("Loading transactions from {csv_path:#?}");
    let summary = import_transactions_csv(File::open(csv_path)?, &mut conn, &args.timezone)?;

    println!(
        "Imported {} transactions, {} stored in total.",
        summary.imported,
        count_transactions(&conn)?
    );

    Ok(())
}
