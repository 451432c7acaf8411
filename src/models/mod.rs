pub mod commands;
pub mod document;
pub mod micro_task;
pub mod task;

pub use commands::*;
pub use document::*;
pub use micro_task::*;
pub use task::*;
