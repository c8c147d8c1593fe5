use crate::report::{run_income_report, run_score_report, IncomeArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rent_score::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "rent-score",
    about = "Score tenant rent payment histories and infer monthly income",
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
    /// Score a payment history exported as CSV
    Score(ScoreArgs),
    /// Infer average monthly income from a statement exported as CSV
    Income(IncomeArgs),
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
        Command::Score(args) => run_score_report(args),
        Command::Income(args) => run_income_report(args),
    }
}
