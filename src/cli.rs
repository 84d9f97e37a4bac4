use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::server;
use crate::services::preprocess;

#[derive(Parser)]
#[command(name = "diagram-summary")]
#[command(author, version, about = "OCR an image and summarize it as a Mermaid diagram", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve,

    /// Run the full OCR + summary pipeline on a local image and print the JSON reply
    Summarize {
        /// Image file (png, jpeg, ...)
        image: PathBuf,
    },

    /// Run only the preprocessing steps and save the image the OCR engine would see
    Preprocess {
        /// Source image
        input: PathBuf,
        /// Destination; the format follows the extension
        output: PathBuf,
    },
}

pub async fn handle_summarize(image: &Path, config: &Config) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;

    let summarizer = server::build_summarizer(config)?;
    let response = summarizer.summarize(bytes).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub fn handle_preprocess(input: &Path, output: &Path) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let processed = preprocess::prepare_bytes(&bytes)?;
    processed
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Saved {}x{} preprocessed image to {}",
        processed.width(),
        processed.height(),
        output.display()
    );
    Ok(())
}
