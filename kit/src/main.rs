//! `kit` command line: thin wrappers around the library helpers plus the
//! project scaffold.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scaffold_kit::codec::{compress, decompress};
use scaffold_kit::config::Config;
use scaffold_kit::crypto::digest::{md5_hex, sha256_hex};
use scaffold_kit::fs::{write_file, FileContent, OutputDir};
use scaffold_kit::logging;
use scaffold_kit::prompt::{confirm_with, ABORT_MESSAGE};
use scaffold_kit::scaffold::Scaffold;
use scaffold_kit::timing::wait;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Personal project scaffolding kit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap a new project in the current directory
    Setup,

    /// Print the MD5 hex digest of TEXT
    Md5 { text: String },

    /// Print the SHA-256 hex digest of TEXT
    Sha256 { text: String },

    /// Gzip INPUT into OUTPUT (written under the output root)
    Gzip { input: PathBuf, output: PathBuf },

    /// Print the text content of a gzip file
    Gunzip { input: PathBuf },

    /// Write CONTENT to PATH under the output root
    Write {
        path: PathBuf,
        content: String,

        /// Parse CONTENT as JSON and write it indented
        #[arg(long)]
        json: bool,

        /// Overwrite an existing file without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Sleep for MS milliseconds
    Wait { ms: u64 },

    /// Show the loaded configuration with secrets redacted
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();
    logging::init(&config);

    match cli.command {
        Commands::Setup => {
            let root = std::env::current_dir().context("unable to resolve the current directory")?;
            Scaffold::new(root).run().await?;
            println!("✅ Project setup complete");
        }
        Commands::Md5 { text } => println!("{}", md5_hex(&text)),
        Commands::Sha256 { text } => println!("{}", sha256_hex(&text)),
        Commands::Gzip { input, output } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("unable to read {}", input.display()))?;
            let compressed = compress(data).await?;
            let written = OutputDir::default().write(&output, compressed)?;
            println!("{}", written.display());
        }
        Commands::Gunzip { input } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("unable to read {}", input.display()))?;
            print!("{}", decompress(data).await?);
        }
        Commands::Write { path, content, json, yes } => {
            let content = if json {
                let value: serde_json::Value =
                    serde_json::from_str(&content).context("CONTENT is not valid JSON")?;
                FileContent::Json(value)
            } else {
                FileContent::Text(content)
            };
            let output = OutputDir::default();
            let stdin = BufReader::new(tokio::io::stdin());
            match write_confirmed(&output, &path, content, yes, stdin, tokio::io::stdout()).await? {
                Some(target) => println!("{}", target.display()),
                None => println!("{ABORT_MESSAGE}"),
            }
        }
        Commands::Wait { ms } => {
            let started = Instant::now();
            wait(ms).await;
            println!("{}", started.elapsed().as_millis());
        }
        Commands::Config => println!("{}", serde_json::to_string_pretty(&config.redacted())?),
    }

    Ok(())
}

/// Writes `content` through `output`. An existing target is only replaced
/// after a `yes` on the prompt streams, unless `yes` was passed. Returns
/// `None` when the overwrite is declined; nothing is written then.
async fn write_confirmed<R, W>(
    output: &OutputDir,
    path: &Path,
    content: FileContent,
    yes: bool,
    prompt_in: R,
    prompt_out: W,
) -> Result<Option<PathBuf>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let target = output.resolve(path)?;
    if target.exists() && !yes {
        let question = format!("{} exists. Overwrite?", target.display());
        if !confirm_with(prompt_in, prompt_out, &question).await?.is_accepted() {
            return Ok(None);
        }
    }
    write_file(&target, content)?;
    Ok(Some(target))
}
