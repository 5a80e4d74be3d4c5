use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

/// A simple Markdown to HTML converter
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output file (default: the input path with a .html extension)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the bare HTML fragment without the page scaffold
    #[arg(long)]
    fragment: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read '{}'", cli.input.display()))?;
    info!("converting '{}'", cli.input.display());

    let body = marky::markdown_to_html(&source);
    let html = if cli.fragment {
        body
    } else {
        let title = cli.input.file_stem().map_or_else(
            || "Markdown Document".to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        marky::page::render(&title, &body)
    };

    let out_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("html"));
    fs::write(&out_path, html)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    println!("Successfully converted to '{}'", out_path.display());
    Ok(())
}
