use clap::{ArgAction, Parser};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "commitgen",
    version,
    about = "Suggest a conventional commit message for the staged diff and commit it"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
