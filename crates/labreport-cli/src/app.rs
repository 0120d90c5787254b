//! CLI application logic
//!
//! Thin shell over [`labreport_core::convert`]: argument parsing,
//! existence checks with readable messages, progress output, and exit
//! status. All conversion behavior lives in the core crate.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "labreport")]
#[command(author, version, about = "Fill experiment report templates", long_about = None)]
struct Cli {
    /// Experiment metadata XML file
    metadata: PathBuf,

    /// Delimited measurement data file
    data: PathBuf,

    /// Report template DOCX file
    template: PathBuf,

    /// Output DOCX file (defaults to updating the template in place)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Parse arguments and run the conversion
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    convert_command(&cli.metadata, &cli.data, &cli.template, cli.output.as_deref())
}

/// Execute the conversion command
pub fn convert_command(
    metadata: &Path,
    data: &Path,
    template: &Path,
    output: Option<&Path>,
) -> Result<()> {
    println!("labreport v{}", labreport_core::VERSION);

    if !metadata.exists() {
        anyhow::bail!("Metadata file not found: {}", metadata.display());
    }
    if !data.exists() {
        anyhow::bail!("Data file not found: {}", data.display());
    }
    if !template.exists() {
        anyhow::bail!("Template file not found: {}", template.display());
    }

    println!("  Metadata: {}", metadata.display());
    println!("  Data:     {}", data.display());
    println!("  Template: {}", template.display());

    labreport_core::convert(metadata, data, template, output)
        .context("Conversion failed")?;

    let target = output.unwrap_or(template);
    println!();
    println!("✓ Report written: {}", target.display());

    Ok(())
}
