use crate::error::Error;
use std::path::PathBuf;
use std::process::{Command as GitCommand, Stdio};

/// The staged diff as reported by `git diff --cached`.
#[derive(Debug, Clone)]
pub struct StagedDiff {
    text: String,
}

impl StagedDiff {
    pub fn new(text: impl Into<String>) -> Self {
        StagedDiff { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The two things commitgen needs from version control.
pub trait Repository {
    /// Capture the staged diff.
    fn staged_diff(&self) -> Result<StagedDiff, Error>;

    /// Create a commit from the staged changes with `message`.
    fn commit(&self, message: &str) -> Result<(), Error>;
}

/// `Repository` backed by the `git` executable on PATH.
#[derive(Debug)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        GitCli { workdir: dir.into() }
    }

    fn command(&self, args: &[&str]) -> GitCommand {
        log::debug!("Running git {:?} in {:?}", args, self.workdir);
        let mut cmd = GitCommand::new("git");
        cmd.args(args).current_dir(&self.workdir);
        cmd
    }
}

impl Repository for GitCli {
    fn staged_diff(&self) -> Result<StagedDiff, Error> {
        let output = self
            .command(&["diff", "--cached"])
            .output()
            .map_err(|e| Error::DiffRetrieval(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::DiffRetrieval(if stderr.is_empty() {
                format!("git diff exited with status {:?}", output.status.code())
            } else {
                stderr
            }));
        }

        Ok(StagedDiff::new(String::from_utf8_lossy(&output.stdout)))
    }

    fn commit(&self, message: &str) -> Result<(), Error> {
        // Inherited stdio so hook output and the commit summary reach the user.
        let status = self
            .command(&["commit", "-m", message])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::CommitExecution(format!("failed to run git: {e}")))?;

        if !status.success() {
            return Err(Error::CommitExecution(format!(
                "git commit exited with status {:?}",
                status.code()
            )));
        }

        Ok(())
    }
}
