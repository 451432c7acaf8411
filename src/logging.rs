use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "STEPIFY_LOG";

/// Pick the filter directive: `STEPIFY_LOG` wins, then `--verbose`, then the
/// config file, then `warn`.
pub fn filter_directive(env_value: Option<&str>, verbose: bool, configured: Option<&str>) -> String {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return value.to_string();
    }
    if verbose {
        return "debug".to_string();
    }
    configured
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("warn")
        .to_string()
}

/// Install the global subscriber. Logs go to stderr so `--json` output on stdout
/// stays machine-readable.
pub fn init_logging(verbose: bool, configured: Option<&str>) -> anyhow::Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env_value.as_deref(), verbose, configured);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow::anyhow!("invalid log filter `{directive}`: {e}"))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
