use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::task::{TaskPriority, TaskStatus};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskCommand {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, alias = "microTaskCommands")]
    pub micro_tasks: Vec<CreateMicroTaskCommand>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMicroTaskCommand {
    /// Owning task; only read by the referenced-storage variant.
    pub task_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub order: Option<i32>,
}

/// Partial update for a task.
///
/// Clearable fields are tri-state: `None` leaves the field alone, `Some(None)`
/// clears it, `Some(Some(v))` sets it. In JSON that is absent / `null` / value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskCommand {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<TaskStatus>>,
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Option<TaskPriority>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "present")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

/// Partial update for a micro task. No field can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMicroTaskCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub order: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
}

// A field that is present in the input is `Some`, even when its value is `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_task_command_distinguishes_absent_from_null() {
        let cmd: UpdateTaskCommand =
            serde_json::from_str(r#"{"status": null, "priority": "HIGH"}"#).unwrap();
        assert_eq!(cmd.status, Some(None));
        assert_eq!(cmd.priority, Some(Some(TaskPriority::High)));
        assert_eq!(cmd.description, None);
        assert_eq!(cmd.title, None);
    }

    #[test]
    fn create_task_command_reads_nested_micro_tasks() {
        let cmd: CreateTaskCommand = serde_json::from_str(
            r#"{"title": "Ship", "microTasks": [{"title": "a", "order": 1}, {"title": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(cmd.micro_tasks.len(), 2);
        assert_eq!(cmd.micro_tasks[0].order, Some(1));
        assert_eq!(cmd.micro_tasks[1].title, "b");
    }
}
