//! Glowgen - product content page generator.
//!
//! Reads one product record and emits FAQ, product page, and comparison
//! page JSON documents. Diagnostics go to stderr; the artifacts are the
//! only JSON this tool produces.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glowgen::ollama::{DisabledGenerator, OllamaGenerator, QuestionGenerator};
use glowgen::output;
use glowgen::pipeline::Pipeline;
use glowgen_common::{GlowgenConfig, Product};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "glowgen")]
#[command(about = "Product content page generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the FAQ, product page, and comparison page documents
    Generate {
        /// Product input JSON file
        #[arg(long)]
        input: PathBuf,

        /// Directory for the generated documents (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip the generative call and use the deterministic question bank
        #[arg(long)]
        offline: bool,
    },

    /// Validate a product input file without generating anything
    Validate {
        /// Product input JSON file
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output_dir,
            config,
            offline,
        } => generate(input, output_dir, config, offline).await,
        Commands::Validate { input } => validate(input),
    }
}

fn load_product(input: &PathBuf) -> Result<Product> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let product = Product::from_json(&raw)?;
    Ok(product)
}

async fn generate(
    input: PathBuf,
    output_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let config = GlowgenConfig::load(config_path.as_deref())?;
    let product = load_product(&input)?;
    info!("loaded product: {}", product.name);

    let generator: Box<dyn QuestionGenerator> = if offline || !config.generator.enabled {
        info!("generative source disabled; question bank will be used");
        Box::new(DisabledGenerator)
    } else {
        Box::new(OllamaGenerator::new(config.generator.clone()))
    };

    let pipeline = Pipeline::standard(generator);
    let state = pipeline.run(product).await?;

    let out_dir = output_dir.unwrap_or(config.output.dir);
    output::write_documents(&state, &out_dir)?;

    println!(
        "{} three documents written to {}",
        "done:".green(),
        out_dir.display()
    );
    Ok(())
}

fn validate(input: PathBuf) -> Result<()> {
    let product = load_product(&input)?;
    println!(
        "{} {} is a valid product record ({})",
        "ok:".green(),
        input.display(),
        product.name
    );
    Ok(())
}
