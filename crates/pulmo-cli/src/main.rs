use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use pulmo_cli::cli::Cli;
use pulmo_cli::config::{self, LogFormat};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let loaded = config::load(cli.config.as_deref())?;
    init_tracing(loaded.config.log_format);
    loaded.log();

    pulmo_cli::commands::run(cli, &loaded.config)
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
