mod allocate;
mod config;
mod db;
mod error;
mod ledger;
mod logging;
mod models;
mod report;
mod run;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let config = config::Config::resolve(&mut args)?;

    if args.len() > 1 {
        logging::init_tracing("budgetplan=warn", None);
    } else {
        logging::init_tracing("budgetplan=info", Some(&config.log_path));
    }

    let mut db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database: {}", config.db_path.display()))?;

    match args.len() {
        1 => run::as_tui(&mut db),
        _ => run::as_cli(&args, &mut db),
    }
}
