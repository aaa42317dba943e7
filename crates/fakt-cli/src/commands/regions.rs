//! Regions command - show the text extracted for each region.
//!
//! Calibration aid for the region definitions: prints what the text
//! source hands the parser, so a misplaced region shows up before it
//! turns into missing-anchor failures.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use fakt_core::models::config::RegionsFile;
use fakt_core::pdf::{PdfExtractor, PdfTextSource};

/// Arguments for the regions command.
#[derive(Args)]
pub struct RegionsArgs {
    /// Input invoice PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Region definitions file
    #[arg(short, long, default_value = "regions.json")]
    regions: PathBuf,
}

pub fn run(args: RegionsArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let regions_file = RegionsFile::from_file(&args.regions)?;

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let regions = extractor.extract_regions(&regions_file.regions)?;

    for region in &regions {
        println!("{}", style(&region.name).bold());
        println!("{}", region.extract);
        println!();
    }

    Ok(())
}
