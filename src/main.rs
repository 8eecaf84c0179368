mod cli_args;
mod config;
mod confirm;
mod error;
mod git;
mod llm;
mod logging;
mod pipeline;
mod setup;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::env;
use std::io;
use std::process::ExitCode;

use crate::cli_args::Cli;
use crate::config::Config;
use crate::git::GitCli;
use crate::llm::tokens::ContextGuard;
use crate::pipeline::{Outcome, Pipeline};

fn run() -> Result<Outcome> {
    // Credential check comes first so nothing touches git or the network without it.
    let cfg = Config::from_env()?;
    if let Some(warning) = cfg.context_window_warning() {
        eprintln!("{} {}", "⚠".yellow().bold(), warning);
    }

    let llm = setup::build_llm_client(&cfg)?;
    let guard = ContextGuard::for_model(&cfg.model, cfg.max_context_tokens)?;
    let repo = GitCli::in_dir(env::current_dir()?);

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    Pipeline::new(&repo, llm.as_ref(), &guard).run(&mut input, &mut out)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match run() {
        Ok(outcome) => {
            match outcome {
                Outcome::Committed { message } => log::info!("Committed {:?}", message),
                other => log::info!("Finished without committing: {:?}", other),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", "✖".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
