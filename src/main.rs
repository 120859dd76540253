mod aggregate;
mod config;
mod db;
mod entry;
mod export;
mod insight;
mod models;
mod report;
mod run;
mod store;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Backend;

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let cfg = config::load_config(&config::config_path()?)?;
    let mut store = open_store(&cfg.storage)?;

    match args.len() {
        1 => run::dashboard(&store),
        2.. => run::as_cli(&args, &mut store, &cfg),
        _ => {
            eprintln!("Usage: billbook [command]");
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("BILLBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(storage: &config::StorageSection) -> Result<store::Store> {
    let path = config::storage_path(storage)?;
    debug!(backend = ?storage.backend, path = %path.display(), "opening store");
    Ok(match storage.backend {
        Backend::Sqlite => store::Store::new(db::Database::open(&path)?),
        Backend::Json => store::Store::new(db::FileStore::open(&path)?),
    })
}
