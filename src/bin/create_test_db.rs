use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use ledger_rs::{TransactionFields, TransactionStore, TransactionType, create_app_state};

/// A utility for creating a test database for the REST API server of ledger_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let state = create_app_state(Connection::open(output_path)?)?;

    println!("Creating test transactions...");

    let now = OffsetDateTime::now_utc();
    let income = TransactionType::Income;
    let expense = TransactionType::Expense;
    let sample_transactions = [
        (income, "Salary", Decimal::new(350000, 2), 28, "Monthly pay"),
        (expense, "Rent", Decimal::new(120000, 2), 27, "Rent"),
        (expense, "Groceries", Decimal::new(8734, 2), 20, "Supermarket"),
        (expense, "Transport", Decimal::new(4500, 2), 12, "Bus pass"),
        (income, "Interest", Decimal::new(1265, 2), 3, "Savings interest"),
    ];

    for (kind, category, amount, days_ago, description) in sample_transactions {
        state.transaction_store.insert(
            TransactionFields::default()
                .kind(kind.as_str())
                .category(category)
                .amount(amount)
                .date(now - Duration::days(days_ago))
                .description(description),
        )?;
    }

    println!("Success!");

    Ok(())
}
