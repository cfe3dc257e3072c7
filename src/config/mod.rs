pub mod batch_config;
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::ScenarioConfig;
#[cfg(feature = "cli")]
use crate::core::report::OUTPUT_FORMATS;
#[cfg(feature = "cli")]
use crate::domain::model::LeadershipRank;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_one_of, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

/// Command-line options. Values given here override the scenario file.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "mlm-earnings")]
#[command(about = "Compute commission earnings for a single member")]
pub struct CliConfig {
    /// Path to a scenario TOML file
    #[arg(short, long)]
    pub scenario: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub matrix_bonus: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub referral_bonus: Option<f64>,

    /// Percentage of the referral bonus paid as matching bonus
    #[arg(long, allow_negative_numbers = true)]
    pub matching_bonus: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub cycle_bonus: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub fast_start_bonus: Option<f64>,

    /// Percentage of team size paid per rank step
    #[arg(long, allow_negative_numbers = true)]
    pub leadership_bonus: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub matrix_level: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub direct_referrals: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub team_size: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub cycles_completed: Option<i64>,

    /// None, Bronze, Silver, Gold, Platinum or Diamond
    #[arg(long)]
    pub rank: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub fast_start: Option<bool>,

    /// Output format: text, json or csv
    #[arg(long)]
    pub format: Option<String>,

    /// Decimal places used when displaying amounts
    #[arg(long)]
    pub precision: Option<usize>,

    /// Reject negative values and unknown ranks
    #[arg(long)]
    pub strict: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the scenario file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<ScenarioConfig> {
        let mut config = match &self.scenario {
            Some(path) => {
                tracing::debug!("Loading scenario from: {}", path);
                ScenarioConfig::from_file(path)?
            }
            None => ScenarioConfig::default(),
        };

        let commission = &mut config.commission;
        override_with(&mut commission.matrix_bonus, self.matrix_bonus);
        override_with(&mut commission.referral_bonus, self.referral_bonus);
        override_with(&mut commission.matching_bonus, self.matching_bonus);
        override_with(&mut commission.cycle_bonus, self.cycle_bonus);
        override_with(&mut commission.fast_start_bonus, self.fast_start_bonus);
        override_with(&mut commission.leadership_bonus, self.leadership_bonus);

        let performance = &mut config.performance;
        override_with(&mut performance.matrix_level, self.matrix_level);
        override_with(&mut performance.direct_referrals, self.direct_referrals);
        override_with(&mut performance.team_size, self.team_size);
        override_with(&mut performance.cycles_completed, self.cycles_completed);
        override_with(&mut performance.fast_start_qualified, self.fast_start);
        if let Some(rank) = &self.rank {
            performance.leadership_rank = LeadershipRank::from_label(rank);
        }

        if self.format.is_some() {
            config.output.format = self.format.clone();
        }
        if self.precision.is_some() {
            config.output.precision = self.precision;
        }
        if self.strict {
            config.calculation.strict = Some(true);
        }

        Ok(config)
    }
}

#[cfg(feature = "cli")]
fn override_with<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.scenario {
            validate_path("scenario", path)?;
        }
        if let Some(format) = &self.format {
            validate_one_of("format", format, &OUTPUT_FORMATS)?;
        }
        Ok(())
    }
}
