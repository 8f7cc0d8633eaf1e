use std::process::ExitCode;

use clap::Parser as _;
use homepage::{Cli, Commands, LogFormat, list_links, refresh_libraries, run_server};
use tracing::error;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

fn init_tracing(cli: &Cli) {
    let default_level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let builder = tracing_subscriber::fmt()
        .with_ansi(!cli.no_color)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        );
    match cli.log_format {
        LogFormat::Full => builder.init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = match &cli.command {
        Some(Commands::Links {}) => {
            list_links(&cli).await;
            Ok(())
        }
        Some(Commands::RefreshLibraries { username }) => refresh_libraries(&cli, username).await,
        None => run_server(&cli).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(?err, "failed to run");
            ExitCode::FAILURE
        }
    }
}
