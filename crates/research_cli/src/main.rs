//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `research_core` linkage with deterministic output.
//! - Given a slot database, print the library listing.

use clap::Parser;
use research_core::db::open_db;
use research_core::{LibraryConfig, ResearchLibrary, SqliteSlotStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "research_cli")]
#[command(version)]
#[command(about = "Probe the research library core and list a library", long_about = None)]
struct Cli {
    /// SQLite slot database to list. Created and seeded when missing.
    db: Option<PathBuf>,

    /// TOML configuration (owner name, slot keys, logging)
    #[arg(short, long, value_name = "PATH", requires = "db")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("research_core ping={}", research_core::ping());
    println!("research_core version={}", research_core::core_version());

    let Some(db_path) = cli.db.as_deref() else {
        return ExitCode::SUCCESS;
    };

    match list_library(db_path, cli.config.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn list_library(
    db_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => LibraryConfig::load_from_path(path)?,
        None => LibraryConfig::default(),
    };
    research_core::init_from_settings(&config.log)?;

    let conn = open_db(db_path)?;
    let store = SqliteSlotStore::new(&conn);
    let library = ResearchLibrary::new(&store, &config);
    let loaded = library.library().load()?;

    println!("status={:?} count={}", loaded.status, loaded.items.len());
    for item in &loaded.items {
        println!("{} | {} | {} reads | {}", item.id, item.date, item.views, item.title);
    }
    Ok(())
}
