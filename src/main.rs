use std::process;

use clap::Parser;

use stepify::cli::{self, Cli, Commands, Context};
use stepify::config::Config;
use stepify::db::connection;
use stepify::logging;

fn main() {
    let cli_args = Cli::parse();

    let config = match connection::config_path() {
        Some(path) => Config::load(&path),
        None => Ok(Config::default()),
    };
    let ctx = Context {
        json: cli_args.json,
        db: cli_args.db,
        config: config.as_ref().cloned().unwrap_or_default(),
    };
    if let Err(e) = config {
        ctx.report(&e);
        process::exit(1);
    }

    if let Err(e) = logging::init_logging(cli_args.verbose, ctx.config.log_level.as_deref()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(&ctx),
        Commands::Task(cmd) => cli::task::run(cmd, &ctx),
        Commands::Micro(cmd) => cli::micro::run(cmd, &ctx),
    };

    process::exit(exit_code);
}
