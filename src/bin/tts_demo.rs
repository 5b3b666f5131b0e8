//! Demo: synthesize a fixed line of text and save it as `output.mp3` in the
//! current working directory.
//!
//! The credential comes from the OPENAI_API_KEY environment variable:
//!
//!   OPENAI_API_KEY="your_key" cargo run --bin tts-demo

use anyhow::Context;
use std::path::Path;
use voxgen::{RunSummary, SpeechConfig, SpeechRunner};

const TEXT_TO_SPEAK: &str = "Hello, this is a test of the emergency broadcast system.";
const INSTRUCTIONS: &str = "Speak like a friendly story teller telling a sleepy bedtime story";
const OUTPUT_FILENAME: &str = "output.mp3";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let output_path = std::env::current_dir()
        .context("cannot resolve working directory")?
        .join(OUTPUT_FILENAME);

    // Every failure funnels into the one ✗ line; the process still exits 0.
    match generate(&output_path).await {
        Ok(summary) => {
            println!(
                "    ✓ Speech generated successfully: {}",
                summary.output_path.display()
            );
        }
        Err(e) => {
            println!("    ✗ Error generating speech: {e:#}");
        }
    }

    Ok(())
}

async fn generate(output_path: &Path) -> anyhow::Result<RunSummary> {
    let config = SpeechConfig::from_env()?.with_instructions(INSTRUCTIONS);

    println!("    Attempting to generate speech for: {TEXT_TO_SPEAK}");
    println!("    Model: {}", config.model);
    println!("    Voice: {}", config.voice);
    println!("    Output file: {OUTPUT_FILENAME}");
    println!("    Output file path: {}", output_path.display());

    let runner = SpeechRunner::new(config).await?;
    let summary = runner.run(TEXT_TO_SPEAK, output_path).await?;
    Ok(summary)
}
