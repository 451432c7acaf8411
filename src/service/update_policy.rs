//! Field-by-field merge rules for partial updates.
//!
//! Task state fields (description, status, priority, due date, completion time)
//! follow the command exactly, including clears. A task title is only ever
//! replaced. Micro task fields are only replaced, never cleared, and a blank
//! micro task title is ignored.

use crate::models::{MicroTask, Task, UpdateMicroTaskCommand, UpdateTaskCommand};

pub fn apply_task_update(task: &mut Task, command: &UpdateTaskCommand) {
    if let Some(title) = &command.title {
        task.title = title.clone();
    }
    if let Some(description) = &command.description {
        task.description = description.clone();
    }
    if let Some(status) = command.status {
        task.status = status;
    }
    if let Some(priority) = command.priority {
        task.priority = priority;
    }
    if let Some(due_date) = command.due_date {
        task.due_date = due_date;
    }
    if let Some(completed_at) = command.completed_at {
        task.completed_at = completed_at;
    }
}

pub fn apply_micro_task_update(micro_task: &mut MicroTask, command: &UpdateMicroTaskCommand) {
    if let Some(title) = command.title.as_deref().filter(|t| !t.trim().is_empty()) {
        micro_task.title = title.to_string();
    }
    if let Some(description) = &command.description {
        micro_task.description = Some(description.clone());
    }
    if let Some(status) = command.status {
        micro_task.status = Some(status);
    }
    if let Some(order) = command.order {
        micro_task.order = Some(order);
    }
    if let Some(completed_at) = command.completed_at {
        micro_task.completed_at = Some(completed_at);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{TaskPriority, TaskStatus};

    fn sample_task() -> Task {
        let mut task = Task::new("Plan release");
        task.description = Some("cut the branch".into());
        task.status = Some(TaskStatus::InProgress);
        task.priority = Some(TaskPriority::High);
        task.due_date = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        task
    }

    fn sample_micro_task() -> MicroTask {
        let mut micro = MicroTask::new("Tag build");
        micro.description = Some("v1.2".into());
        micro.status = Some(TaskStatus::Pending);
        micro.order = Some(1);
        micro
    }

    #[test]
    fn empty_task_command_changes_nothing() {
        let mut task = sample_task();
        let before = task.clone();
        apply_task_update(&mut task, &UpdateTaskCommand::default());
        assert_eq!(task, before);
    }

    #[test]
    fn null_title_keeps_title_but_null_status_clears_status() {
        let mut task = sample_task();
        let command = UpdateTaskCommand {
            title: None,
            status: Some(None),
            ..Default::default()
        };
        apply_task_update(&mut task, &command);
        assert_eq!(task.title, "Plan release");
        assert_eq!(task.status, None);
        assert_eq!(task.priority, Some(TaskPriority::High));
    }

    #[test]
    fn task_command_sets_provided_values() {
        let mut task = sample_task();
        let done = Utc.with_ymd_and_hms(2024, 5, 30, 17, 0, 0).unwrap();
        let command = UpdateTaskCommand {
            title: Some("Ship release".into()),
            description: Some(None),
            status: Some(Some(TaskStatus::Completed)),
            completed_at: Some(Some(done)),
            ..Default::default()
        };
        apply_task_update(&mut task, &command);
        assert_eq!(task.title, "Ship release");
        assert_eq!(task.description, None);
        assert_eq!(task.status, Some(TaskStatus::Completed));
        assert_eq!(task.completed_at, Some(done));
        assert!(task.due_date.is_some());
    }

    #[test]
    fn blank_micro_task_title_is_ignored() {
        let mut micro = sample_micro_task();
        let command = UpdateMicroTaskCommand {
            title: Some("   ".into()),
            ..Default::default()
        };
        apply_micro_task_update(&mut micro, &command);
        assert_eq!(micro.title, "Tag build");

        let command = UpdateMicroTaskCommand {
            title: Some("New".into()),
            ..Default::default()
        };
        apply_micro_task_update(&mut micro, &command);
        assert_eq!(micro.title, "New");
    }

    #[test]
    fn empty_micro_task_command_changes_nothing() {
        let mut micro = sample_micro_task();
        let before = micro.clone();
        apply_micro_task_update(&mut micro, &UpdateMicroTaskCommand::default());
        assert_eq!(micro, before);
    }

    #[test]
    fn micro_task_fields_are_replaced_not_cleared() {
        let mut micro = sample_micro_task();
        let command = UpdateMicroTaskCommand {
            status: Some(TaskStatus::Completed),
            order: Some(7),
            ..Default::default()
        };
        apply_micro_task_update(&mut micro, &command);
        assert_eq!(micro.status, Some(TaskStatus::Completed));
        assert_eq!(micro.order, Some(7));
        assert_eq!(micro.description.as_deref(), Some("v1.2"));
    }
}
