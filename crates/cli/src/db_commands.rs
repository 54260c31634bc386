use std::path::Path;

use {clap::Subcommand, steeple_config::SteepleConfig};

#[derive(Subcommand)]
pub enum DbAction {
    /// Create the database and run all pending migrations.
    Migrate,
    /// Delete the database files (including WAL/SHM siblings).
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

pub async fn handle(action: DbAction, config: &SteepleConfig) -> anyhow::Result<()> {
    match action {
        DbAction::Migrate => migrate(config).await,
        DbAction::Reset { yes } => reset(config, yes),
    }
}

async fn migrate(config: &SteepleConfig) -> anyhow::Result<()> {
    let path = steeple_config::database_path(config);
    // Opening the store runs the embedded migrations.
    crate::open_store(config).await?;
    println!("Migrations complete: {}", path.display());
    Ok(())
}

fn reset(config: &SteepleConfig, yes: bool) -> anyhow::Result<()> {
    let path = steeple_config::database_path(config);

    if !yes && !crate::confirm(&format!("Delete database files at {}?", path.display())) {
        println!("Aborted.");
        return Ok(());
    }

    let deleted = delete_db_files(&path)?;
    if deleted == 0 {
        println!("No database files found at {}.", path.display());
    } else {
        println!("Deleted {deleted} file(s). Run `steeple db migrate` to recreate the schema.");
    }
    Ok(())
}

/// Delete the database plus the `-wal`/`-shm` siblings SQLite may have left
/// behind. Returns how many files were removed.
fn delete_db_files(path: &Path) -> anyhow::Result<usize> {
    let mut deleted = 0;
    let base = path.to_string_lossy();
    for suffix in ["", "-wal", "-shm"] {
        let candidate = std::path::PathBuf::from(format!("{base}{suffix}"));
        if candidate.exists() {
            std::fs::remove_file(&candidate)?;
            println!("Deleted: {}", candidate.display());
            deleted += 1;
        }
    }
    Ok(deleted)
}
