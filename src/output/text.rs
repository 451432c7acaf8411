use crate::models::{MicroTask, Task};

fn short_id(id: Option<&str>) -> &str {
    let id = id.unwrap_or("-");
    &id[..std::cmp::min(8, id.len())]
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, or_dash(t.id.as_deref()));
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", or_dash(t.status.map(|s| s.as_str())));
    println!("  Priority: {}", or_dash(t.priority.map(|p| p.as_str())));
    if let Some(due) = t.due_date {
        println!("  Due: {}", due.to_rfc3339());
    }
    if let Some(completed) = t.completed_at {
        println!("  Completed: {}", completed.to_rfc3339());
    }
    if let Some(created) = t.created_at {
        println!("  Created: {}", created.to_rfc3339());
    }
    if !t.micro_tasks.is_empty() {
        println!("  Micro tasks:");
        for m in &t.micro_tasks {
            print_micro_task_line(m);
        }
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        println!(
            "  [{}] {} ({}) {} micro={}",
            or_dash(t.status.map(|s| s.as_str())),
            t.title,
            short_id(t.id.as_deref()),
            or_dash(t.priority.map(|p| p.as_str())),
            t.micro_tasks.len()
        );
    }
}

fn print_micro_task_line(m: &MicroTask) {
    let order = m.order.map(|o| o.to_string()).unwrap_or_else(|| "-".into());
    println!(
        "    #{} [{}] {} ({})",
        order,
        or_dash(m.status.map(|s| s.as_str())),
        m.title,
        or_dash(m.id.as_deref())
    );
}

pub fn print_micro_task(m: &MicroTask) {
    println!("Micro task: {} ({})", m.title, or_dash(m.id.as_deref()));
    if let Some(ref task_id) = m.task_id {
        println!("  Task: {task_id}");
    }
    if let Some(ref desc) = m.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", or_dash(m.status.map(|s| s.as_str())));
    if let Some(order) = m.order {
        println!("  Order: {order}");
    }
    if let Some(completed) = m.completed_at {
        println!("  Completed: {}", completed.to_rfc3339());
    }
}

pub fn print_micro_task_list(micro_tasks: &[MicroTask]) {
    if micro_tasks.is_empty() {
        println!("No micro tasks found.");
        return;
    }
    for m in micro_tasks {
        println!(
            "  [{}] {} ({}) task={}",
            or_dash(m.status.map(|s| s.as_str())),
            m.title,
            short_id(m.id.as_deref()),
            short_id(m.task_id.as_deref())
        );
    }
}
