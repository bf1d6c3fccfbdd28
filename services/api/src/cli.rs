use crate::demo::{run_demo, run_screen, DemoArgs, ScreenArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use clearny::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ClearNY Screening Service",
    about = "Run and demonstrate the ClearNY record relief screening service from the command line",
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
    /// Screen questionnaire responses from the command line
    Screen {
        #[command(subcommand)]
        command: ScreenCommand,
    },
    /// Run an end-to-end CLI demo covering intake and evaluation
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScreenCommand {
    /// Evaluate responses from a web-form CSV export (or a built-in sample)
    Evaluate(ScreenArgs),
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
        Command::Screen {
            command: ScreenCommand::Evaluate(args),
        } => run_screen(args),
        Command::Demo(args) => run_demo(args),
    }
}
