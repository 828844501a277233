use crate::demo::{run_demo, DemoArgs};
use crate::report::{
    run_arv, run_deal, run_neighborhood, run_score, ArvArgs, DealArgs, NeighborhoodArgs,
    ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use flipfinder::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FlipFinder",
    about = "Score, value and track Michigan fix-and-flip leads",
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
    /// Score every lead in a CSV export and print them by priority
    Score(ScoreArgs),
    /// Predict the after-repair value of a single property
    Arv(ArvArgs),
    /// Grade a market area for long-term investment
    Neighborhood(NeighborhoodArgs),
    /// Run the flip economics for a negotiated purchase price
    Deal(DealArgs),
    /// Generate synthetic leads and print the resulting pipeline
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
    /// Seed every random draw so responses are reproducible
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Pre-load the in-memory pipeline with this many synthetic leads
    #[arg(long)]
    pub(crate) demo_leads: Option<usize>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Arv(args) => run_arv(args),
        Command::Neighborhood(args) => run_neighborhood(args),
        Command::Deal(args) => run_deal(args),
        Command::Demo(args) => run_demo(args),
    }
}
