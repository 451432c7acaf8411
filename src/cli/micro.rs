use serde_json::json;

use crate::cli::commands::MicroCommands;
use crate::cli::{parse_status, Context};
use crate::error::StepifyError;
use crate::models::{CreateMicroTaskCommand, UpdateMicroTaskCommand};
use crate::output;
use crate::service::MicroTaskService;

pub fn run(cmd: MicroCommands, ctx: &Context) -> i32 {
    let result = match cmd {
        MicroCommands::Create { task_id, title, description, status, order } => {
            parse_status(status.as_deref()).and_then(|status| {
                let command = CreateMicroTaskCommand {
                    task_id: Some(task_id),
                    title,
                    description,
                    status,
                    order,
                };
                run_create(command, ctx)
            })
        }
        MicroCommands::List => run_list(ctx),
        MicroCommands::Show { id } => run_show(&id, ctx),
        MicroCommands::Update { id, title, description, status, order, completed } => {
            parse_status(status.as_deref()).and_then(|status| {
                let command = UpdateMicroTaskCommand {
                    title,
                    description,
                    status,
                    order,
                    completed_at: completed,
                };
                run_update(&id, &command, ctx)
            })
        }
        MicroCommands::Delete { id } => run_delete(&id, ctx),
    };
    ctx.finish(result)
}

fn run_create(command: CreateMicroTaskCommand, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let micro = MicroTaskService::new(&store).create(command)?;
    ctx.emit(
        || json!({ "microTask": output::json::micro_task_json(&micro) }),
        || {
            println!(
                "Created micro task: {} ({})",
                micro.title,
                micro.id.as_deref().unwrap_or_default()
            )
        },
    );
    Ok(0)
}

fn run_list(ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let micro_tasks = MicroTaskService::new(&store).find_all_micro_tasks()?;
    ctx.emit(
        || {
            json!({
                "microTasks": micro_tasks.iter().map(output::json::micro_task_json).collect::<Vec<_>>()
            })
        },
        || output::text::print_micro_task_list(&micro_tasks),
    );
    Ok(0)
}

fn run_show(id: &str, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let micro = MicroTaskService::new(&store).find_micro_task_by_id(id)?;
    ctx.emit(
        || json!({ "microTask": output::json::micro_task_json(&micro) }),
        || output::text::print_micro_task(&micro),
    );
    Ok(0)
}

fn run_update(id: &str, command: &UpdateMicroTaskCommand, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    let micro = MicroTaskService::new(&store).update_micro_task_by_id(id, command)?;
    ctx.emit(
        || json!({ "microTask": output::json::micro_task_json(&micro) }),
        || println!("Updated micro task: {} ({})", micro.title, id),
    );
    Ok(0)
}

fn run_delete(id: &str, ctx: &Context) -> Result<i32, StepifyError> {
    let store = ctx.open_store()?;
    MicroTaskService::new(&store).delete_micro_task_by_id(id)?;
    ctx.emit(
        || json!({ "deleted": { "id": id } }),
        || println!("Deleted micro task: {id}"),
    );
    Ok(0)
}
