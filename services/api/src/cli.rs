use crate::demo::{run_demo, run_property_search, DemoArgs, PropertySearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use saledirect::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SaleDirect Marketplace",
    about = "Demonstrate and run the SaleDirect marketplace backend from the command line",
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
    /// Inspect the sample property catalog
    Properties {
        #[command(subcommand)]
        command: PropertiesCommand,
    },
    /// Run an end-to-end CLI demo covering search, the listing wizard, and compliance
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PropertiesCommand {
    /// Search the catalog with optional filters and sorting
    Search(PropertySearchArgs),
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
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Properties {
            command: PropertiesCommand::Search(args),
        } => run_property_search(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
