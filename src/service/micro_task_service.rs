//! Micro tasks stored as their own documents, pointing at a task by `taskId`.

use tracing::info;

use crate::db::DocumentStore;
use crate::error::{LookupContext, StepifyError};
use crate::models::{CreateMicroTaskCommand, MicroTask, Task, UpdateMicroTaskCommand};

use super::lookup::{get_or_not_found, soft_delete};
use super::task_service::require_title;
use super::update_policy::apply_micro_task_update;

pub struct MicroTaskService<'s, S: DocumentStore> {
    store: &'s S,
}

impl<'s, S: DocumentStore> MicroTaskService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// The owning task must be live; nothing is written otherwise.
    pub fn create(&self, command: CreateMicroTaskCommand) -> Result<MicroTask, StepifyError> {
        info!(title = %command.title, "creating new micro task");
        require_title(&command.title)?;
        let task_id = command
            .task_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| StepifyError::validation("taskId is required"))?;
        get_or_not_found::<Task, S>(self.store, task_id, LookupContext::CreatingMicroTask)?;

        let mut micro = MicroTask::new(command.title);
        micro.task_id = Some(task_id.to_string());
        micro.description = command.description;
        micro.status = command.status;
        micro.order = command.order;

        let saved = self.store.save(micro)?;
        info!(
            id = saved.id.as_deref().unwrap_or_default(),
            title = %saved.title,
            "micro task created"
        );
        Ok(saved)
    }

    pub fn find_all_micro_tasks(&self) -> Result<Vec<MicroTask>, StepifyError> {
        info!("searching all micro tasks");
        self.store.find_all_live()
    }

    pub fn find_micro_task_by_id(&self, id: &str) -> Result<MicroTask, StepifyError> {
        info!(id, "searching micro task");
        let micro = get_or_not_found(self.store, id, LookupContext::Searching)?;
        info!(id, "micro task found");
        Ok(micro)
    }

    pub fn update_micro_task_by_id(
        &self,
        id: &str,
        command: &UpdateMicroTaskCommand,
    ) -> Result<MicroTask, StepifyError> {
        info!(id, "updating micro task");
        let mut micro: MicroTask = get_or_not_found(self.store, id, LookupContext::Updating)?;
        apply_micro_task_update(&mut micro, command);
        let saved = self.store.save(micro)?;
        info!(id, "micro task updated successfully");
        Ok(saved)
    }

    pub fn delete_micro_task_by_id(&self, id: &str) -> Result<(), StepifyError> {
        info!(id, "deleting micro task");
        soft_delete::<MicroTask, S>(self.store, id)?;
        info!(id, "micro task deleted successfully");
        Ok(())
    }
}
