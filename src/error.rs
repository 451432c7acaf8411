use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    NotFound,
    ValidationError,
    ConfigError,
    DatabaseError,
    SerializationError,
    IoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }
}

/// Kind of document a lookup was aimed at, used in not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    MicroTask,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => f.write_str("Task"),
            Self::MicroTask => f.write_str("Micro task"),
        }
    }
}

/// Operation that was in flight when a lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupContext {
    Searching,
    Updating,
    Deleting,
    AddingMicroTask,
    UpdatingMicroTask,
    DeletingMicroTask,
    CreatingMicroTask,
}

impl LookupContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Searching => "searching",
            Self::Updating => "updating",
            Self::Deleting => "deleting",
            Self::AddingMicroTask => "adding microtask",
            Self::UpdatingMicroTask => "updating microtask",
            Self::DeletingMicroTask => "deleting microtask",
            Self::CreatingMicroTask => "creating microtask",
        }
    }
}

impl fmt::Display for LookupContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StepifyError {
    #[error("stepify is not initialized. Run `stepify init` first.")]
    NotInitialized,

    #[error("{entity} with ID: {id} not found while {context}")]
    NotFound {
        entity: EntityKind,
        id: String,
        context: LookupContext,
    },

    #[error("{0}")]
    Validation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StepifyError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>, context: LookupContext) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
            context,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Serialization(_) => ErrorCode::SerializationError,
            Self::Io(_) => ErrorCode::IoError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_id_and_context() {
        let err = StepifyError::not_found(EntityKind::MicroTask, "01J", LookupContext::UpdatingMicroTask);
        assert_eq!(err.to_string(), "Micro task with ID: 01J not found while updating microtask");
        assert_eq!(err.code().as_str(), "NOT_FOUND");
    }
}
