//! Analyze command handler

use anyhow::{Context, Result};
use colored::*;
use fitcheck_client::OutfitAnalyzer;

use crate::config::Config;
use crate::images::resolve_image;

/// Ask the vision model for styling feedback on an outfit photo
pub async fn analyze_outfit(image: &str, config: &Config) -> Result<()> {
    let image_url = resolve_image(image)?;
    let client = config.vision_client()?;

    let analysis = client
        .analyze(&image_url)
        .await
        .context("Failed to analyze outfit")?;

    println!("{}", "Outfit Feedback".bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", analysis.message);
    println!("{}", "─".repeat(80).dimmed());

    Ok(())
}
