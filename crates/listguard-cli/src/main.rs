//! ListGuard CLI
//!
//! Runs one product listing through the compliance and copy-generation
//! pipeline: vision analysis of the main image, tiered risk classification
//! of the image text and the seller's feature text, then prompt-guarded
//! copy generation.
//!
//! Exit status is 1 when the pipeline aborts on a compliance gate, 0
//! otherwise (including generation-service failures, which are reported as
//! formatted text).

use anyhow::Result;
use clap::Parser;
use listguard_core::ListingInput;
use listguard_llm::{DashScopeClient, GenerationStage, VisionStage};
use listguard_pipeline::{Pipeline, PipelineOutcome};
use listguard_rules::{RiskClassifier, RiskDatabase};
use std::sync::Arc;
use tracing::{info, warn};

mod config;

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "listguard")]
#[command(about = "Listing compliance and copy-generation assistant", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Rulebook document path
    #[arg(short, long)]
    rulebook: Option<String>,

    /// Model service API key
    #[arg(short = 'k', long, env = "LISTGUARD_API_KEY")]
    api_key: Option<String>,

    /// Product category
    #[arg(long)]
    category: String,

    /// Seller-authored selling points
    #[arg(long)]
    features: String,

    /// Main product image reference (URL or path)
    #[arg(long, default_value = "test.jpg")]
    image: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting ListGuard");

    let config = AppConfig::load(&cli.config, &cli)?;
    info!("Rulebook: {}", config.rulebook_path);
    info!("Vision model: {}", config.service.vision_model);
    info!("Generation model: {}", config.service.generation_model);

    let database = Arc::new(RiskDatabase::from_file(&config.rulebook_path)?);
    if !database.loaded() {
        warn!("Compliance rulebook unavailable; all texts will pass");
    }

    let client = Arc::new(DashScopeClient::new(config.service)?);
    let pipeline = Pipeline::new(
        RiskClassifier::new(database),
        VisionStage::new(client.clone()),
        GenerationStage::new(client),
    );

    let input = ListingInput {
        category: cli.category,
        features: cli.features,
        image_ref: cli.image,
    };

    match pipeline.run(&input).await {
        PipelineOutcome::Completed(copy) => {
            if copy.corrected {
                println!("(已按修正指令重写违规卖点)");
            }
            println!("{}", copy.text);
            Ok(())
        }
        PipelineOutcome::Aborted { stage, reason } => {
            eprintln!("流程终止 [{}]: {}", stage.label(), reason);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("listguard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("listguard=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
