use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod images;
mod models;
mod output;
mod routines;
mod validate;

use config::{Cli, Command, Settings};
use images::{HttpFetcher, ImageResolver, ImageSource};
use output::{read_plan, write_plan, Summary};
use routines::build_plan;
use validate::validate;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_args(&cli.paths);
    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => generate(&settings),
        Command::Check { file } => check(&file),
    }
}

fn generate(settings: &Settings) -> Result<()> {
    info!("Local images: {}", settings.image_dir.display());
    let fetcher = HttpFetcher::new(settings.timeout).context("Failed to build HTTP client")?;
    let mut images = ImageResolver::new(&settings.image_dir, &settings.cache_dir, fetcher);

    let summary = generate_with(&mut images, &settings.output)
        .with_context(|| format!("Failed to generate {}", settings.output.display()))?;

    let stats = images.stats();
    println!("\nGenerated: {}", summary.path.display());
    println!("{}", summary);
    println!(
        "  Sources: {} local, {} downloaded, {} cached, {} failed",
        stats.local, stats.downloads, stats.cache_hits, stats.failures
    );
    Ok(())
}

fn generate_with<S: ImageSource>(src: &mut S, output: &Path) -> error::Result<Summary> {
    let plan = build_plan(src)?;
    validate(&plan)?;
    write_plan(&plan, output)
}

fn check(file: &Path) -> Result<()> {
    let (_, summary) =
        read_plan(file).with_context(|| format!("{} is not a valid routines file", file.display()))?;
    println!("\nValid: {}", summary.path.display());
    println!("{}", summary);
    Ok(())
}
