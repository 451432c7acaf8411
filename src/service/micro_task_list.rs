//! Edits to a task's embedded micro task list.
//!
//! Lists are taken by value and handed back. Positions are never re-sorted;
//! `order` is only a key for whoever displays the list. An id that matches
//! nothing is reported as `NotFound`.

use crate::error::{EntityKind, LookupContext, StepifyError};
use crate::models::{MicroTask, UpdateMicroTaskCommand};

use super::update_policy::apply_micro_task_update;

pub fn add(mut micro_tasks: Vec<MicroTask>, item: MicroTask) -> Vec<MicroTask> {
    micro_tasks.push(item);
    micro_tasks
}

pub fn update_by_id(
    mut micro_tasks: Vec<MicroTask>,
    id: &str,
    command: &UpdateMicroTaskCommand,
) -> Result<Vec<MicroTask>, StepifyError> {
    let target = micro_tasks
        .iter_mut()
        .find(|m| m.has_id(id))
        .ok_or_else(|| {
            StepifyError::not_found(EntityKind::MicroTask, id, LookupContext::UpdatingMicroTask)
        })?;
    apply_micro_task_update(target, command);
    Ok(micro_tasks)
}

pub fn delete_by_id(mut micro_tasks: Vec<MicroTask>, id: &str) -> Result<Vec<MicroTask>, StepifyError> {
    let position = micro_tasks
        .iter()
        .position(|m| m.has_id(id))
        .ok_or_else(|| {
            StepifyError::not_found(EntityKind::MicroTask, id, LookupContext::DeletingMicroTask)
        })?;
    micro_tasks.remove(position);
    Ok(micro_tasks)
}
