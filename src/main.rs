use campus::cli::{parse_args, run_cli_command};
use campus::config::CampusConfig;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &CampusConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(campus::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = CampusConfig::from_env()?;
    init_tracing(&config);

    let command = parse_args(std::env::args());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_cli_command(command, &config))
}
