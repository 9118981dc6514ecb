//! Article Desk - command-line entry point.

use std::process::ExitCode;

use tracing::error;

use article_cli::{init_tracing, CliConfig, CliError, CliResult, Menu};
use article_db::Database;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Session aborted");
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CliResult<()> {
    let config = CliConfig::load()?;
    init_tracing(&config.logging.filter);

    println!("Connecting to the database...");
    let mut db = Database::connect(&config.db_config()).await?;
    println!("Connected");

    let stdin = std::io::stdin();
    Menu::new(&mut db, stdin.lock(), std::io::stdout()).run().await?;

    if let Err(err) = db.close().await {
        error!(error = %err, "Failed to close database");
    }
    Ok(())
}

fn report(err: &CliError) {
    match err {
        CliError::Database(db_err) => {
            println!("Error");
            println!("Code: {}", db_err.code());
            println!("Message: {}", db_err);
        }
        other => eprintln!("Error: {}", other),
    }
}
