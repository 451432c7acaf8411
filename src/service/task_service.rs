//! Task use cases, including micro tasks embedded in a task document.
//!
//! Every operation is a live lookup followed by at most one write. Embedded
//! micro task edits are read-modify-write of the parent task.

use tracing::info;

use crate::db::DocumentStore;
use crate::error::{LookupContext, StepifyError};
use crate::models::{
    CreateMicroTaskCommand, CreateTaskCommand, MicroTask, Task, UpdateMicroTaskCommand,
    UpdateTaskCommand,
};

use super::lookup::{get_or_not_found, soft_delete};
use super::micro_task_list;
use super::update_policy::apply_task_update;

pub struct TaskService<'s, S: DocumentStore> {
    store: &'s S,
}

impl<'s, S: DocumentStore> TaskService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn create_task(&self, command: CreateTaskCommand) -> Result<Task, StepifyError> {
        info!(title = %command.title, "creating new task");
        require_title(&command.title)?;
        for micro in &command.micro_tasks {
            require_title(&micro.title)?;
        }

        let mut task = Task::new(command.title);
        task.description = command.description;
        task.status = command.status;
        task.priority = command.priority;
        task.due_date = command.due_date;
        task.micro_tasks = command
            .micro_tasks
            .into_iter()
            .map(|micro| self.embedded_micro_task(micro))
            .collect();

        let saved = self.store.save(task)?;
        info!(
            id = saved.id.as_deref().unwrap_or_default(),
            title = %saved.title,
            micro_tasks = saved.micro_tasks.len(),
            "task created"
        );
        Ok(saved)
    }

    pub fn find_all_tasks(&self) -> Result<Vec<Task>, StepifyError> {
        info!("searching all tasks");
        self.store.find_all_live()
    }

    pub fn find_task_by_id(&self, id: &str) -> Result<Task, StepifyError> {
        info!(id, "searching task");
        let task = get_or_not_found(self.store, id, LookupContext::Searching)?;
        info!(id, "task found");
        Ok(task)
    }

    pub fn update_task_by_id(
        &self,
        id: &str,
        command: &UpdateTaskCommand,
    ) -> Result<Task, StepifyError> {
        info!(id, "updating task");
        let mut task: Task = get_or_not_found(self.store, id, LookupContext::Updating)?;
        apply_task_update(&mut task, command);
        let saved = self.store.save(task)?;
        info!(id, "task updated successfully");
        Ok(saved)
    }

    pub fn delete_task_by_id(&self, id: &str) -> Result<(), StepifyError> {
        info!(id, "deleting task");
        soft_delete::<Task, S>(self.store, id)?;
        info!(id, "task deleted successfully");
        Ok(())
    }

    /// Append a new embedded micro task and return the saved parent.
    pub fn add_micro_task(
        &self,
        task_id: &str,
        command: CreateMicroTaskCommand,
    ) -> Result<Task, StepifyError> {
        info!(task_id, "adding micro task to task");
        require_title(&command.title)?;
        let mut task: Task = get_or_not_found(self.store, task_id, LookupContext::AddingMicroTask)?;

        let micro = self.embedded_micro_task(command);
        let micro_id = micro.id.clone().unwrap_or_default();
        task.micro_tasks = micro_task_list::add(std::mem::take(&mut task.micro_tasks), micro);

        let saved = self.store.save(task)?;
        info!(task_id, micro_task_id = %micro_id, "micro task added successfully");
        Ok(saved)
    }

    pub fn update_micro_task(
        &self,
        task_id: &str,
        micro_task_id: &str,
        command: &UpdateMicroTaskCommand,
    ) -> Result<Task, StepifyError> {
        info!(task_id, micro_task_id, "updating embedded micro task");
        let mut task: Task =
            get_or_not_found(self.store, task_id, LookupContext::UpdatingMicroTask)?;
        task.micro_tasks = micro_task_list::update_by_id(
            std::mem::take(&mut task.micro_tasks),
            micro_task_id,
            command,
        )?;
        let saved = self.store.save(task)?;
        info!(task_id, micro_task_id, "micro task updated successfully");
        Ok(saved)
    }

    pub fn delete_micro_task(&self, task_id: &str, micro_task_id: &str) -> Result<Task, StepifyError> {
        info!(task_id, micro_task_id, "deleting embedded micro task");
        let mut task: Task =
            get_or_not_found(self.store, task_id, LookupContext::DeletingMicroTask)?;
        task.micro_tasks =
            micro_task_list::delete_by_id(std::mem::take(&mut task.micro_tasks), micro_task_id)?;
        let saved = self.store.save(task)?;
        info!(task_id, micro_task_id, "micro task deleted successfully");
        Ok(saved)
    }

    fn embedded_micro_task(&self, command: CreateMicroTaskCommand) -> MicroTask {
        let mut micro = MicroTask::new(command.title);
        micro.id = Some(self.store.new_id());
        micro.description = command.description;
        micro.status = command.status;
        micro.order = command.order;
        micro.created_at = Some(self.store.now());
        micro
    }
}

pub(crate) fn require_title(title: &str) -> Result<(), StepifyError> {
    if title.trim().is_empty() {
        return Err(StepifyError::validation("title must not be blank"));
    }
    Ok(())
}
