use crate::demo::{run_demo, run_tiers, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use driver_onboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Driver Onboarding Service",
    about = "Run and demonstrate the driver & guide onboarding workflow service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the partner tier catalog with required documents
    Tiers,
    /// Run an end-to-end CLI demo walking an application through all four steps
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the wallet currency used for newly onboarded partners
    #[arg(long)]
    pub(crate) wallet_currency: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Tiers => run_tiers(),
        Command::Demo(args) => run_demo(args),
    }
}
