use clap::Parser;
use log::error;
use slrg_core::init_logging;
use slrg_server::{serve, Settings, StartupError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "slrg-server", version, about = "SLRG member registry HTTP server")]
struct Cli {
    /// TOML settings file; defaults to `slrg.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={err}");
            eprintln!("slrg-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    init_logging(&settings.logging.level, settings.logging.dir.as_deref())
        .map_err(StartupError::Logging)?;
    serve(settings).await
}
