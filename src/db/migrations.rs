use rusqlite::Connection;

use crate::error::StepifyError;

/// Idempotent; `init` runs it on every call.
pub fn run_migrations(conn: &Connection) -> Result<(), StepifyError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            body TEXT NOT NULL CHECK (json_valid(body)),
            PRIMARY KEY (collection, id)
        );

        CREATE INDEX IF NOT EXISTS idx_documents_live
            ON documents(collection, json_extract(body, '$.deleted'));
        ",
    )?;
    Ok(())
}
