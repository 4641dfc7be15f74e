use crate::console::run_console;
use crate::demo::run_demo;
use crate::server;
use clap::{Args, Parser, Subcommand};
use campus_placement::config::AppConfig;
use campus_placement::error::AppError;
use campus_placement::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Campus Placement & Career Services",
    about = "Run the campus placement registry as an interactive console or an HTTP service",
    version
)]
struct Cli {
    /// Start with an empty registry instead of the sample roster
    #[arg(long, global = true)]
    no_sample_data: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive student / company / admin menus (default command)
    Console,
    /// Start the HTTP service
    Serve(ServeArgs),
    /// Walk one student through application, interview and offer, then print the report
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if cli.no_sample_data {
        config.placement.seed_sample_data = false;
    }

    telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Console) {
        Command::Console => run_console(&config),
        Command::Serve(args) => server::run(config, args).await,
        Command::Demo => run_demo(),
    }
}
