use clap::Parser;
use mlm_earnings::core::BatchSettings;
use mlm_earnings::utils::{logger, validation::Validate};
use mlm_earnings::{BatchConfig, CsvBatchPipeline, EarningsEngine, EarningsError, LocalStorage};

#[derive(Parser)]
#[command(name = "batch-earnings")]
#[command(about = "Compute earnings for every member in a CSV file")]
struct Args {
    /// Path to batch TOML configuration file
    #[arg(short, long, default_value = "batch-earnings.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Override the strict setting from config
    #[arg(long)]
    strict: Option<bool>,

    /// Override the input CSV path from config
    #[arg(long)]
    input: Option<String>,

    /// Dry run - validate config and input without writing reports
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting batch earnings run");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match BatchConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    config.apply_overrides(args.strict, args.input);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    let pipeline = CsvBatchPipeline::new(LocalStorage::new("."), config);
    let engine = EarningsEngine::new(pipeline);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - reports will not be written");
        match engine.dry_run().await {
            Ok(rows) => {
                println!("✅ Config valid, {} member rows readable", rows);
                return Ok(());
            }
            Err(e) => exit_with(&e),
        }
    }

    match engine.run().await {
        Ok(outputs) => {
            tracing::info!("✅ Batch completed successfully!");
            for path in &outputs {
                println!("📁 {}", path);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &EarningsError) -> ! {
    tracing::error!(
        "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn display_config_summary(config: &BatchConfig) {
    tracing::info!("📋 Batch: {}", config.batch_name());
    if let Some(description) = &config.batch.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("   Input: {}", config.input_path());
    tracing::info!(
        "   Output: {} ({})",
        config.output_path(),
        config.output_formats().join(", ")
    );
    tracing::info!(
        "   Strict: {}, skip invalid rows: {}",
        config.strict(),
        config.skip_invalid_rows()
    );
    tracing::debug!("   Rates: {:?}", config.commission());
}
