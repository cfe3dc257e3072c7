use clap::Parser;
use mlm_earnings::core::scenario;
use mlm_earnings::utils::{logger, validation::Validate};
use mlm_earnings::{CliConfig, EarningsError};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting mlm-earnings");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    tracing::debug!(
        "Computing '{}' (strict: {})",
        config.name(),
        config.calculation.strict()
    );

    let result = match scenario::calculate(&config) {
        Ok(result) => result,
        Err(e) => exit_with(&e),
    };

    if !config.performance.leadership_rank.is_recognized() {
        tracing::warn!(
            "Unknown rank '{}', leadership bonus is 0",
            config.performance.leadership_rank
        );
    }

    let output = scenario::render(&config, &result)?;
    println!("{}", output);

    Ok(())
}

fn exit_with(e: &EarningsError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
