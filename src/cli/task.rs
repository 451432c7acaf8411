use std::io::{self, Read};

use serde_json::json;

use crate::cli::commands::{EmbeddedMicroCommands, TaskCommands};
use crate::cli::{parse_priority, parse_status, Context};
use crate::error::StepifyError;
use crate::models::{
    CreateMicroTaskCommand, CreateTaskCommand, UpdateMicroTaskCommand, UpdateTaskCommand,
};
use crate::output;
use crate::service::TaskService;

pub fn run(cmd: TaskCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        TaskCommands::Create { title, description, status, priority, due, micro } => {
            build_create(title, description, status.as_deref(), priority.as_deref(), due, micro)
                .and_then(|command| run_create(command, ctx))
        }
        TaskCommands::Load => read_stdin_command().and_then(|command| run_create(command, ctx)),
        TaskCommands::List => run_list(ctx),
        TaskCommands::Show { id } => run_show(&id, ctx),
        TaskCommands::Update { id, title, description, status, priority, due, completed, clear } => {
            let patch = TaskPatchArgs { title, description, status, priority, due, completed, clear };
            patch.into_command().and_then(|command| run_update(&id, &command, ctx))
        }
        TaskCommands::Delete { id } => run_delete(&id, ctx),
        TaskCommands::Micro(micro_cmd) => run_micro(micro_cmd, ctx),
    };
    ctx.finish(result)
}

fn build_create(
    title: String,
    description: Option<String>,
    status: Option<&str>,
    priority: Option<&str>,
    due: Option<chrono::DateTime<chrono::Utc>>,
    micro_titles: Vec<String>,
) -> Result<CreateTaskCommand, StepifyError> {
    Ok(CreateTaskCommand {
        title,
        description,
        status: parse_status(status)?,
        priority: parse_priority(priority)?,
        micro_tasks: micro_titles
            .into_iter()
            .map(|title| CreateMicroTaskCommand {
                title,
                ..Default::default()
            })
            .collect(),
        due_date: due,
    })
}

fn read_stdin_command() -> Result<CreateTaskCommand, StepifyError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    serde_json::from_str(&input)
        .map_err(|e| StepifyError::validation(format!("Invalid task JSON: {e}")))
}

fn run_create(command: CreateTaskCommand, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let task = TaskService::new(&store).create_task(command)?;
    ctx.emit(
        || json!({ "task": output::json::task_json(&task) }),
        || {
            println!(
                "Created task: {} ({})",
                task.title,
                task.id.as_deref().unwrap_or_default()
            )
        },
    );
    Ok(0)
}

fn run_list(ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let tasks = TaskService::new(&store).find_all_tasks()?;
    ctx.emit(
        || {
            json!({
                "tasks": tasks.iter().map(output::json::task_summary).collect::<Vec<_>>()
            })
        },
        || output::text::print_task_list(&tasks),
    );
    Ok(0)
}

fn run_show(id: &str, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let task = TaskService::new(&store).find_task_by_id(id)?;
    ctx.emit(
        || json!({ "task": output::json::task_json(&task) }),
        || output::text::print_task(&task),
    );
    Ok(0)
}

struct TaskPatchArgs {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    due: Option<chrono::DateTime<chrono::Utc>>,
    completed: Option<chrono::DateTime<chrono::Utc>>,
    clear: Vec<String>,
}

impl TaskPatchArgs {
    fn into_command(self) -> Result<UpdateTaskCommand, StepifyError> {
        let clears = |field: &str| self.clear.iter().any(|c| c == field);
        for (field, set) in [
            ("description", self.description.is_some()),
            ("status", self.status.is_some()),
            ("priority", self.priority.is_some()),
            ("due", self.due.is_some()),
            ("completed", self.completed.is_some()),
        ] {
            if set && clears(field) {
                return Err(StepifyError::validation(format!(
                    "Cannot both set and clear '{field}'"
                )));
            }
        }

        Ok(UpdateTaskCommand {
            title: self.title.clone(),
            description: patch(self.description.clone(), clears("description")),
            status: patch(parse_status(self.status.as_deref())?, clears("status")),
            priority: patch(parse_priority(self.priority.as_deref())?, clears("priority")),
            due_date: patch(self.due, clears("due")),
            completed_at: patch(self.completed, clears("completed")),
        })
    }
}

fn patch<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    match (value, clear) {
        (Some(v), _) => Some(Some(v)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

fn run_update(id: &str, command: &UpdateTaskCommand, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let task = TaskService::new(&store).update_task_by_id(id, command)?;
    ctx.emit(
        || json!({ "task": output::json::task_json(&task) }),
        || println!("Updated task: {} ({})", task.title, id),
    );
    Ok(0)
}

fn run_delete(id: &str, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    TaskService::new(&store).delete_task_by_id(id)?;
    ctx.emit(
        || json!({ "deleted": { "id": id } }),
        || println!("Deleted task: {id}"),
    );
    Ok(0)
}

fn run_micro(cmd: EmbeddedMicroCommands, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let service = TaskService::new(&store);

    let (task, message) = match cmd {
        EmbeddedMicroCommands::Add { task_id, title, description, status, order } => {
            let command = CreateMicroTaskCommand {
                task_id: None,
                title,
                description,
                status: parse_status(status.as_deref())?,
                order,
            };
            let task = service.add_micro_task(&task_id, command)?;
            let added = task
                .micro_tasks
                .last()
                .and_then(|m| m.id.clone())
                .unwrap_or_default();
            (task, format!("Added micro task {added} to task {task_id}"))
        }
        EmbeddedMicroCommands::Update { task_id, micro_id, title, description, status, order, completed } => {
            let command = UpdateMicroTaskCommand {
                title,
                description,
                status: parse_status(status.as_deref())?,
                order,
                completed_at: completed,
            };
            let task = service.update_micro_task(&task_id, &micro_id, &command)?;
            (task, format!("Updated micro task {micro_id} in task {task_id}"))
        }
        EmbeddedMicroCommands::Remove { task_id, micro_id } => {
            let task = service.delete_micro_task(&task_id, &micro_id)?;
            (task, format!("Removed micro task {micro_id} from task {task_id}"))
        }
    };

    ctx.emit(
        || json!({ "task": output::json::task_json(&task) }),
        || println!("{message}"),
    );
    Ok(0)
}
