use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::StepifyError;
use crate::models::Document;

use super::connection;

/// Persistence contract the services are written against.
///
/// "Live" means `deleted = false`. Saving assigns an id when the document has
/// none, keeps `createdAt` once set and refreshes `updatedAt` every time.
pub trait DocumentStore {
    fn find_live_by_id<T: Document>(&self, id: &str) -> Result<Option<T>, StepifyError>;

    /// Live documents of one collection in insertion order.
    fn find_all_live<T: Document>(&self) -> Result<Vec<T>, StepifyError>;

    fn save<T: Document>(&self, doc: T) -> Result<T, StepifyError>;

    /// Overwrite a single top-level field. Returns the number of documents changed.
    fn patch_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<usize, StepifyError>;

    /// Physically delete a document. Returns the number of documents removed.
    fn remove(&self, collection: &str, id: &str) -> Result<usize, StepifyError>;

    fn soft_delete_supported(&self) -> bool;

    fn new_id(&self) -> String;

    fn now(&self) -> chrono::DateTime<chrono::Utc>;
}

/// SQLite-backed document store. Documents are JSON bodies keyed by
/// `(collection, id)`.
pub struct SqliteStore {
    conn: Connection,
    clock: Box<dyn Clock>,
    soft_delete: bool,
}

impl SqliteStore {
    pub fn new(conn: Connection, clock: Box<dyn Clock>, config: &StoreConfig) -> Self {
        Self {
            conn,
            clock,
            soft_delete: config.soft_delete,
        }
    }

    /// Open the workspace (or overridden) database with the wall clock.
    pub fn open(
        db_override: Option<&std::path::Path>,
        config: &StoreConfig,
    ) -> Result<Self, StepifyError> {
        let conn = connection::open_db(db_override)?;
        Ok(Self::new(conn, Box::new(SystemClock), config))
    }

    pub fn in_memory(clock: Box<dyn Clock>, config: &StoreConfig) -> Result<Self, StepifyError> {
        let conn = connection::open_in_memory()?;
        Ok(Self::new(conn, clock, config))
    }

    /// Raw body lookup, deleted documents included.
    pub fn raw_body(&self, collection: &str, id: &str) -> Result<Option<Value>, StepifyError> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|b| serde_json::from_str(&b).map_err(StepifyError::from))
            .transpose()
    }

    /// Number of stored documents in a collection, deleted ones included.
    pub fn count(&self, collection: &str) -> Result<i64, StepifyError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl DocumentStore for SqliteStore {
    fn find_live_by_id<T: Document>(&self, id: &str) -> Result<Option<T>, StepifyError> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents
                 WHERE collection = ?1 AND id = ?2 AND json_extract(body, '$.deleted') = 0",
                params![T::COLLECTION, id],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn find_all_live<T: Document>(&self) -> Result<Vec<T>, StepifyError> {
        let mut stmt = self.conn.prepare(
            "SELECT body FROM documents
             WHERE collection = ?1 AND json_extract(body, '$.deleted') = 0
             ORDER BY rowid ASC",
        )?;
        let bodies = stmt
            .query_map(params![T::COLLECTION], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StepifyError::from))
            .collect()
    }

    fn save<T: Document>(&self, mut doc: T) -> Result<T, StepifyError> {
        let now = self.clock.now();
        let id = match doc.id() {
            Some(id) => id.to_string(),
            None => self.new_id(),
        };
        let created_at = doc.created_at().unwrap_or(now);
        doc.stamp(id.clone(), created_at, now);

        let body = serde_json::to_string(&doc)?;
        self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO UPDATE SET body = excluded.body",
            params![T::COLLECTION, id, body],
        )?;
        debug!(collection = T::COLLECTION, id = %id, "document saved");
        Ok(doc)
    }

    fn patch_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<usize, StepifyError> {
        let path = format!("$.{field}");
        let changed = self.conn.execute(
            "UPDATE documents SET body = json_set(body, ?3, json(?4))
             WHERE collection = ?1 AND id = ?2",
            params![collection, id, path, value.to_string()],
        )?;
        debug!(collection, id, field, changed, "document field patched");
        Ok(changed)
    }

    fn remove(&self, collection: &str, id: &str) -> Result<usize, StepifyError> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        debug!(collection, id, changed, "document removed");
        Ok(changed)
    }

    fn soft_delete_supported(&self) -> bool {
        self.soft_delete
    }

    fn new_id(&self) -> String {
        ulid::Ulid::new().to_string()
    }

    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}
