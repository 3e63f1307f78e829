//! One-shot bootstrap of a new project in the current directory.

use anyhow::{Context, Result};
use scaffold_kit::config::Config;
use scaffold_kit::logging;
use scaffold_kit::scaffold::Scaffold;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load();
    logging::init(&config);

    let root = std::env::current_dir().context("unable to resolve the current directory")?;
    Scaffold::new(root).run().await?;

    println!("✅ Project setup complete");
    Ok(())
}
