use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EntityKind;

use super::document::Document;
use super::task::TaskStatus;

/// A subtask.
///
/// Embedded micro tasks live inside their task's `microTasks` list and carry no
/// `taskId`, `deleted` or `updatedAt`. Referenced micro tasks are documents of
/// their own and use all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroTask {
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub order: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MicroTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            task_id: None,
            title: title.into(),
            description: None,
            status: None,
            order: None,
            completed_at: None,
            deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

impl Document for MicroTask {
    const COLLECTION: &'static str = "micro_tasks";
    const KIND: EntityKind = EntityKind::MicroTask;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn stamp(&mut self, id: String, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }
}
