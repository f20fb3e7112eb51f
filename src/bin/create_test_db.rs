use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{Amount, Category, Expense, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Sample expenses as (amount, description, category, days before today).
const SAMPLE_EXPENSES: [(f64, &str, Category, i64); 10] = [
    (12.5, "Lunch", Category::Food, 0),
    (3.2, "Bus fare", Category::Transportation, 1),
    (45.0, "Groceries", Category::Food, 3),
    (18.0, "Cinema", Category::Leisure, 5),
    (60.0, "Doctor's appointment", Category::Health, 9),
    (120.0, "Online course", Category::Education, 14),
    (950.0, "Rent", Category::Housing, 20),
    (7.99, "", Category::Other, 27),
    (32.4, "Petrol", Category::Transportation, 35),
    (25.0, "Concert tickets for the whole family", Category::Leisure, 41),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let now = OffsetDateTime::now_utc();
    for (amount, description, category, days_ago) in SAMPLE_EXPENSES {
        let date = now.date() - Duration::days(days_ago);
        let builder = Expense::build(Amount::new(amount)?, date)
            .description(description)
            .category(category);

        create_expense(builder, now, &conn)?;
    }

    println!("Success!");

    Ok(())
}
