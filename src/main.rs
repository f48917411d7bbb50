mod config;
mod dataset;
mod seeder;

use config::AppConfig;
use seeder::{Seeder, SeederError};
use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{Level, debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DATA_DIR: &str = "data";
const CSV_NAME: &str = "database.csv";
const LOG_FILE: &str = "database.log";

/// Routes timestamped, line-numbered diagnostics to the log file,
/// truncated on each run. `RUST_LOG` overrides the level.
fn init_tracing(debug: bool) -> std::io::Result<()> {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let log_file = File::create(LOG_FILE)?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Configuration errors are fatal; nothing useful can run without them.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.debug) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    info!(
        env = %config.env,
        host = %config.hostname,
        database = %config.database,
        "Seeder starting"
    );

    // Database errors are logged and do not fail the process.
    if let Err(e) = run(&config).await {
        error!(error = %e, "Seeding failed");
    }

    ExitCode::SUCCESS
}

async fn run(config: &AppConfig) -> Result<(), SeederError> {
    let data_dir = Path::new(DATA_DIR);
    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    let seeder = Seeder::connect(config).await?;
    let result = populate(&seeder, config).await;
    seeder.close().await;
    result
}

async fn populate(seeder: &Seeder, config: &AppConfig) -> Result<(), SeederError> {
    seeder.migrate().await?;

    let csv_path = Path::new(DATA_DIR).join(CSV_NAME);
    let products = if csv_path.is_file() {
        info!(path = %csv_path.display(), "Loading dataset from CSV");
        dataset::load_csv(&csv_path)?
    } else {
        info!(path = %csv_path.display(), "No CSV found, generating sample dataset");
        let products = dataset::generate_products();
        dataset::write_csv(&csv_path, &products)?;
        products
    };

    seeder.seed(&products).await?;

    let product_count = seeder.count("products").await?;
    let user_count = seeder.count("users").await?;
    info!(products = product_count, users = user_count, "Tables populated");

    if config.debug {
        for product in seeder.fetch_products().await? {
            debug!(?product, "product row");
        }
        debug!(ids = ?seeder.fetch_user_ids().await?, "user rows");
    }

    Ok(())
}
