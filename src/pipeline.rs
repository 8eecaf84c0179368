//! The linear run: diff → prompt → guard → completion → confirmation → commit.

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use crate::confirm;
use crate::git::Repository;
use crate::llm::LlmClient;
use crate::llm::prompt_builder;
use crate::llm::tokens::ContextGuard;

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NothingStaged,
    Cancelled,
    Committed { message: String },
}

pub struct Pipeline<'a> {
    repo: &'a dyn Repository,
    llm: &'a dyn LlmClient,
    guard: &'a ContextGuard,
}

impl<'a> Pipeline<'a> {
    pub fn new(repo: &'a dyn Repository, llm: &'a dyn LlmClient, guard: &'a ContextGuard) -> Self {
        Pipeline { repo, llm, guard }
    }

    pub fn run<R, W>(&self, input: &mut R, out: &mut W) -> Result<Outcome>
    where
        R: BufRead,
        W: Write,
    {
        let diff = self.repo.staged_diff()?;
        if diff.is_empty() {
            writeln!(
                out,
                "{} No staged changes found. Stage files with `git add` first.",
                "ℹ".blue().bold()
            )?;
            return Ok(Outcome::NothingStaged);
        }

        let prompt = prompt_builder::build_prompt(diff.text());
        self.guard.check(prompt_builder::template(), diff.text())?;

        let message = self.llm.complete(&prompt)?;

        writeln!(out, "{} {}", "✎".cyan().bold(), "Suggested commit message:".bold())?;
        writeln!(out)?;
        writeln!(out, "    {message}")?;
        writeln!(out)?;

        if !confirm::confirm(input, out)? {
            writeln!(out, "{} Commit cancelled.", "✖".yellow().bold())?;
            return Ok(Outcome::Cancelled);
        }

        self.repo.commit(&message)?;
        writeln!(out, "{} Committed.", "✔".green().bold())?;

        Ok(Outcome::Committed { message })
    }
}
