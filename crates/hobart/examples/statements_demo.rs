//! Example demonstrating statement fetching and reshaping.
//!
//! This example shows how to:
//! 1. Validate a ticker and open a statement session
//! 2. Fetch the three annual statements
//! 3. Transpose a statement into year-labelled columns
//!
//! Note: This requires network access and an FMP API key in `FMP_API_KEY`.

use hobart::{CompanyFinancials, FmpClient, StatementKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("FMP Financial Statements Demo");
    println!("=============================\n");

    let client = FmpClient::from_env()?;

    // Example 1: Validate a ticker and open a session
    println!("Example 1: Opening a session for AAPL");
    println!("--------------------------------------");

    let mut company = match CompanyFinancials::open(&client, "AAPL").await {
        Ok(company) => {
            println!("{} is listed, session open", company.ticker());
            company
        }
        Err(e) => {
            eprintln!("Error opening session: {}", e);
            eprintln!("Note: This is expected without network access or a valid API key");
            return Ok(());
        }
    };

    println!();

    // Example 2: Fetch all three statements
    println!("Example 2: Fetching annual statements");
    println!("--------------------------------------");

    match company.fetch_all().await {
        Ok(()) => {
            for kind in StatementKind::ALL {
                if let Some(table) = company.statement(kind) {
                    println!(
                        "{}: {} periods, {} fields",
                        kind,
                        table.height(),
                        table.width()
                    );
                }
            }
        }
        Err(e) => {
            eprintln!("Error fetching statements: {}", e);
            return Ok(());
        }
    }

    println!();

    // Example 3: Transpose the income statement
    println!("Example 3: Income statement by year");
    println!("------------------------------------");

    match company.transposed(StatementKind::IncomeStatement) {
        Ok(pivot) => {
            println!("years: {:?}", pivot.labels());
            if let Some(revenue) = pivot.row("revenue") {
                println!("revenue by year: {:?}", revenue);
            }
            match pivot.to_frame() {
                Ok(frame) => println!("{}", frame),
                Err(e) => eprintln!("Could not materialize a frame: {}", e),
            }
        }
        Err(e) => {
            eprintln!("Error transposing: {}", e);
        }
    }

    println!();
    println!("Demo complete!");

    Ok(())
}
