use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;

/// Exit code for anything that fails before the scaling loop starts.
const EXIT_STARTUP_FAILED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "scaler",
    about = "Prombench scaler — periodically scales benchmark deployments",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text", env = "PROMBENCH_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Scale Kubernetes deployments periodically up and down.
    ///
    /// ex: scaler scale -v NAMESPACE=scale -f fake-webserver.yaml 20 1 15m
    Scale(commands::scale::ScaleArgs),
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result = match cli.command {
        Commands::Scale(args) => commands::scale::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = format!("{e:#}"), "scaler failed to start");
            ExitCode::from(EXIT_STARTUP_FAILED)
        }
    }
}
