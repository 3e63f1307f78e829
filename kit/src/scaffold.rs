//! New-project bootstrap.
//!
//! The workflow has two steps and no branching: run the external toolchain
//! command, then write the fixed boilerplate set. A failed command leaves the
//! directory untouched; a failed write leaves earlier files in place.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::fs::{self as kit_fs, FsError};

pub const NODE_VERSION: &str = "20";

/// Empty working directory created alongside the files.
pub const WORKING_DIR: &str = "modules";

pub const GITIGNORE_TEMPLATE: &str = ".env
node_modules
output
.DS_Store";

pub const CONFIG_MODULE_TEMPLATE: &str = "const dotenv = require('dotenv'); // load variables from .env file
dotenv.config({ quiet: true });

const isProduction = process.env.NODE_ENV === 'production';

module.exports = {
  s3: {
    accessKeyId: process.env.AWS_ACCESS_KEY,
    secretAccessKey: process.env.AWS_SECRET_ACCESS_KEY,
  },
};";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// Files written by [`Scaffold::materialize`], in write order.
pub const SCAFFOLD_FILES: &[ScaffoldFile] = &[
    ScaffoldFile { path: ".nvmrc", content: NODE_VERSION },
    ScaffoldFile { path: ".env", content: "" },
    ScaffoldFile { path: ".gitignore", content: GITIGNORE_TEMPLATE },
    ScaffoldFile { path: "README.md", content: "" },
    ScaffoldFile { path: "config/index.js", content: CONFIG_MODULE_TEMPLATE },
];

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("unable to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error(transparent)]
    Fs(#[from] FsError),
}

/// External command that prepares the toolchain state of a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BootstrapCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs `script` through a login bash so version managers are on `PATH`.
    pub fn login_shell(script: impl Into<String>) -> Self {
        Self::new("bash", ["-l".to_string(), "-c".to_string(), script.into()])
    }
}

impl Default for BootstrapCommand {
    fn default() -> Self {
        Self::login_shell(format!(
            "nvm use {NODE_VERSION} && npm init -y && npm i dotenv && git init"
        ))
    }
}

pub struct Scaffold {
    root: PathBuf,
    bootstrap: BootstrapCommand,
}

impl Scaffold {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bootstrap: BootstrapCommand::default(),
        }
    }

    pub fn with_bootstrap(mut self, bootstrap: BootstrapCommand) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Initializes the toolchain, then writes the boilerplate.
    pub async fn run(&self) -> Result<(), ScaffoldError> {
        self.initialize().await?;
        self.materialize()?;
        info!(root = %self.root.display(), "Project setup complete");
        Ok(())
    }

    /// Runs the bootstrap command inside the project root and waits for it.
    pub async fn initialize(&self) -> Result<(), ScaffoldError> {
        kit_fs::create_dir(&self.root)?;
        let BootstrapCommand { program, args } = &self.bootstrap;
        debug!(%program, ?args, root = %self.root.display(), "running bootstrap command");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ScaffoldError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ScaffoldError::CommandFailed {
                program: program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        debug!(stdout = %String::from_utf8_lossy(&output.stdout).trim(), "bootstrap command finished");
        Ok(())
    }

    /// Writes every scaffold file (overwriting) and creates the working dir.
    pub fn materialize(&self) -> Result<(), ScaffoldError> {
        for file in SCAFFOLD_FILES {
            kit_fs::write_file(self.root.join(file.path), file.content)?;
        }
        kit_fs::create_dir(self.root.join(WORKING_DIR))?;
        Ok(())
    }
}
