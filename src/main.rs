use std::{process, sync::Arc};

use clap::Parser;
use log::{error, info};
use tokio::sync::Mutex;

use noteverse::{
    App, Cli, Config, MemoryStore, NoteRepository, NoteService, NoteStorage, Result,
};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load(&config_path)?;
    if let Some(notes_dir) = cli.notes_dir {
        config.notes_dir = notes_dir;
    }

    let repo: Box<dyn NoteRepository + Send> = if cli.ephemeral {
        info!("Running with an in-memory note store");
        Box::new(MemoryStore::new())
    } else {
        Box::new(NoteStorage::open(config.notes_dir.clone())?)
    };

    let mut service = NoteService::new(repo);
    if config.seed_on_empty && service.seed_if_empty()? {
        info!("Wrote welcome notes to {}", config.notes_dir.display());
    }

    let app = App::new(
        Arc::new(Mutex::new(service)),
        config,
        config_path,
        cli.verbose,
    );
    app.run(cli.command).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    info!("Application shutting down");
}
