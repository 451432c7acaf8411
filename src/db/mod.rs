pub mod connection;
pub mod document_store;
pub mod migrations;

pub use connection::*;
pub use document_store::{DocumentStore, SqliteStore};
