mod config;
mod db;
mod error;
mod export;
mod logging;
mod models;
mod run;
mod summary;
mod ui;

use anyhow::Result;

use config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (config, args) = Config::from_args(&args)?;
    logging::init(&config.log_path)?;
    tracing::info!(db = %config.db_path.display(), variant = ?config.variant, "starting fintrack");

    let db = db::Database::open(&config.db_path)?;

    let result = match args.len() {
        0 | 1 => run::as_tui(&db, config.variant),
        _ => run::as_cli(&args, &db, config.variant),
    };

    if let Err(e) = db.close() {
        tracing::error!("failed to close database: {e}");
    }
    tracing::info!("fintrack stopped");
    result
}
