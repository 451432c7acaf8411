//! Task and micro task tracking over a small document store.

pub mod cli;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, StoreConfig};
pub use db::{DocumentStore, SqliteStore};
pub use error::{EntityKind, ErrorCode, LookupContext, StepifyError};
pub use service::{MicroTaskService, TaskService};
