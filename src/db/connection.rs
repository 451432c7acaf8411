use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::StepifyError;

use super::migrations;

pub const WORKSPACE_DIR: &str = ".stepify";
pub const DB_FILE: &str = "stepify.db";
pub const CONFIG_FILE: &str = "config.json";

/// Find the nearest directory holding a `.stepify` workspace, walking up from
/// the current directory.
pub fn find_workspace_root() -> Result<PathBuf, StepifyError> {
    let mut dir = env::current_dir()?;
    loop {
        if dir.join(WORKSPACE_DIR).is_dir() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(StepifyError::NotInitialized);
        }
    }
}

/// Path of the workspace directory `init` creates in the current directory.
pub fn local_workspace_dir() -> Result<PathBuf, StepifyError> {
    Ok(env::current_dir()?.join(WORKSPACE_DIR))
}

pub fn default_db_path() -> Result<PathBuf, StepifyError> {
    Ok(find_workspace_root()?.join(WORKSPACE_DIR).join(DB_FILE))
}

/// Config lives next to the workspace database. `None` outside a workspace.
pub fn config_path() -> Option<PathBuf> {
    find_workspace_root()
        .ok()
        .map(|root| root.join(WORKSPACE_DIR).join(CONFIG_FILE))
}

/// Resolve the database path: explicit override first, then the workspace file.
pub fn db_path(db_override: Option<&Path>) -> Result<PathBuf, StepifyError> {
    match db_override {
        Some(path) => Ok(path.to_path_buf()),
        None => default_db_path(),
    }
}

/// Open a connection to an existing database. Returns error if not initialized.
pub fn open_db(db_override: Option<&Path>) -> Result<Connection, StepifyError> {
    let path = db_path(db_override)?;
    if !path.exists() {
        return Err(StepifyError::NotInitialized);
    }
    debug!(path = %path.display(), "opening database");
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Create the database (and its parent directories) and run migrations.
pub fn init_db(path: &Path) -> Result<(), StepifyError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    info!(path = %path.display(), "database initialized");
    Ok(())
}

/// In-memory database with migrations applied.
pub fn open_in_memory() -> Result<Connection, StepifyError> {
    let conn = Connection::open_in_memory()?;
    conn.busy_timeout(Duration::from_secs(5))?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), StepifyError> {
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}
