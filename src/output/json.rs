use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::StepifyError;
use crate::models::{MicroTask, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &StepifyError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code().as_str(),
            "message": err.to_string()
        }
    })
}

fn timestamp(value: Option<DateTime<Utc>>) -> Value {
    match value {
        Some(ts) => json!(ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => Value::Null,
    }
}

pub fn micro_task_json(m: &MicroTask) -> Value {
    let mut v = json!({
        "id": m.id,
        "title": m.title,
        "description": m.description,
        "status": m.status.map(|s| s.as_str()),
        "order": m.order,
        "completedAt": timestamp(m.completed_at),
        "createdAt": timestamp(m.created_at),
    });
    if let Some(ref task_id) = m.task_id {
        v["taskId"] = json!(task_id);
    }
    if m.updated_at.is_some() {
        v["updatedAt"] = timestamp(m.updated_at);
    }
    v
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "status": t.status.map(|s| s.as_str()),
        "priority": t.priority.map(|p| p.as_str()),
        "microTasks": t.micro_tasks.iter().map(micro_task_json).collect::<Vec<_>>(),
        "dueDate": timestamp(t.due_date),
        "completedAt": timestamp(t.completed_at),
        "createdAt": timestamp(t.created_at),
        "updatedAt": timestamp(t.updated_at),
    })
}

pub fn task_summary(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "status": t.status.map(|s| s.as_str()),
        "priority": t.priority.map(|p| p.as_str()),
        "microTaskCount": t.micro_tasks.len(),
    })
}
