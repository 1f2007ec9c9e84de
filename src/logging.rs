use std::io::IsTerminal;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so report output on stdout stays clean.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let default_filter = if verbose {
        "module_planner=debug"
    } else {
        "module_planner=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to initialise logging: {err}"))
}
