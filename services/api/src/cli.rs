use crate::allocate::{run_allocation, AllocateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use line_bid::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Line Bid Allocator",
    about = "Award schedule lines by seniority from pasted bid summaries",
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
    /// Allocate lines from a pasted bid summary and print the awards
    Allocate(AllocateArgs),
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
        Command::Allocate(args) => run_allocation(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_subcommand_parses_paths() {
        let cli = Cli::try_parse_from([
            "line-bid-api",
            "allocate",
            "--input",
            "bids.txt",
            "--csv",
            "awards.csv",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Allocate(args)) => {
                assert_eq!(
                    args.input.as_deref(),
                    Some(std::path::Path::new("bids.txt"))
                );
                assert_eq!(args.csv.as_deref(), Some(std::path::Path::new("awards.csv")));
                assert!(!args.json);
            }
            other => panic!("expected allocate command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["line-bid-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
