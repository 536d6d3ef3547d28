mod cli;
mod error;
mod models;
mod repo;
mod report;
mod store;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    let store = store::FileStore::open(&data_dir)?;
    let ledger = repo::Ledger::new(store, repo::SeedPolicy::default());

    // Install the default catalog before anything reads the service list.
    ledger
        .seed_if_empty()
        .context("Failed to seed default service catalog")?;

    match args.len() {
        1 => cli::cli_summary(&[], &ledger),
        2.. => cli::as_cli(&args, &ledger),
        _ => {
            eprintln!("Usage: trimbook [command]");
            Ok(())
        }
    }
}

fn get_data_dir() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "trimbook", "TrimBook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
