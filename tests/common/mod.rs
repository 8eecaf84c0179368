//! Shared helpers for driving the commitgen binary against throwaway repos.

#![allow(dead_code)]

use assert_cmd::{Command, cargo};
use std::fs;
use std::path::Path;
use std::process::Command as GitCommand;
use tempfile::TempDir;

/// An address nothing listens on, so any accidental network call fails fast.
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9/v1";

pub fn git(dir: &Path, args: &[&str]) -> String {
    let out = GitCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should be installed");
    assert!(out.status.success(), "git {:?} failed: {:?}", args, out);
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// A fresh repository with a local identity so commits work anywhere.
pub fn init_repo() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    dir
}

pub fn stage_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write file");
    git(dir, &["add", name]);
}

pub fn has_commits(dir: &Path) -> bool {
    GitCommand::new("git")
        .args(["rev-parse", "--verify", "-q", "HEAD"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// The binary, run inside `dir`, with HOME pointed there so no user config leaks in.
pub fn commitgen(dir: &Path, base_url: &str) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("OPENAI_API_KEY", "sk-test")
        .env("OPENAI_BASE_URL", base_url)
        .env_remove("COMMITGEN_MODEL")
        .env_remove("COMMITGEN_MAX_CONTEXT_TOKENS")
        .env_remove("COMMITGEN_LOG")
        .env("NO_COLOR", "1");
    cmd
}
