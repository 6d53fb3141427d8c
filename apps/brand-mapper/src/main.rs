//! brand-mapper - assign known brands to one catalog
//!
//! Reads the brand relation list and a product catalog, matches every
//! unassigned product title and writes `brand_mapping_{source}_{country}.json`.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use brand_core::{
    run, BrandConfig, CatalogScope, JsonDirectorySink, JsonProductFile, JsonRelationFile,
    KeyHasher, PlainKeyHasher, Sha256KeyHasher,
};

#[derive(Parser)]
#[command(name = "brand-mapper")]
#[command(about = "Assign known brands to catalog products by title")]
struct Args {
    /// JSON array of brand relation records
    relations: PathBuf,

    /// JSON array of catalog products
    products: PathBuf,

    /// Source system the catalog comes from
    #[arg(long)]
    source: String,

    /// Country code of the catalog
    #[arg(long)]
    country: String,

    /// Directory the result file is written to
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// TOML or JSON file with word lists and parsing options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the composite key instead of its SHA-256
    #[arg(long)]
    plain_keys: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => BrandConfig::load(path)?,
        None => BrandConfig::default(),
    };
    tracing::debug!(?config, "Loaded configuration");

    let hasher: Box<dyn KeyHasher> = if args.plain_keys {
        Box::new(PlainKeyHasher)
    } else {
        Box::new(Sha256KeyHasher)
    };

    let scope = CatalogScope::new(&args.source, &args.country);
    let summary = run(
        &JsonRelationFile::new(&args.relations),
        &JsonProductFile::new(&args.products),
        &JsonDirectorySink::new(&args.output),
        &scope,
        &config,
        hasher.as_ref(),
    )?;

    println!(
        "{}/{}: {} products, {} already branded, {} matched, {} unmatched",
        scope.source,
        scope.country,
        summary.total,
        summary.skipped_assigned,
        summary.matched,
        summary.unmatched
    );
    Ok(())
}
