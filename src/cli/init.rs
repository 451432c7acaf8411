use serde_json::json;

use crate::cli::Context;
use crate::config::Config;
use crate::db::connection;
use crate::error::StepifyError;

pub fn run(ctx: &Context) -> i32 {
    let result = run_init(ctx);
    ctx.finish(result)
}

fn run_init(ctx: &Context) -> Result<i32, StepifyError> {
    let workspace = connection::local_workspace_dir()?;
    std::fs::create_dir_all(&workspace)?;

    let db_path = match ctx.db.as_deref() {
        Some(path) => path.to_path_buf(),
        None => workspace.join(connection::DB_FILE),
    };
    connection::init_db(&db_path)?;

    let config_path = workspace.join(connection::CONFIG_FILE);
    Config::default().write_if_missing(&config_path)?;

    ctx.emit(
        || {
            json!({
                "path": db_path.to_string_lossy(),
                "config": config_path.to_string_lossy(),
            })
        },
        || println!("Initialized stepify at {}", db_path.display()),
    );
    Ok(0)
}
