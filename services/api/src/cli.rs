use crate::demo::{run_demo, run_evaluate, run_replay, DemoArgs, EvaluateArgs, ReplayArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use difficult_ai_core::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Difficult AI",
    about = "Rehearse difficult conversations and score them from the command line",
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
    /// Score a set of session metrics and print the scorecard
    Evaluate(EvaluateArgs),
    /// Replay a recorded transcript CSV through a session and score it
    Replay(ReplayArgs),
    /// Run a scripted rehearsal showing per-turn analysis and the final scorecard
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Replay(args) => run_replay(args),
        Command::Demo(args) => run_demo(args),
    }
}
