use crate::config::toml_config::ScenarioConfig;
use crate::core::calculator::{compute, compute_checked};
use crate::core::report::{render_csv, render_json, render_text};
use crate::domain::model::{
    CalculationResult, CommissionStructure, MemberEarnings, PerformanceInput,
};
use crate::utils::error::{EarningsError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ScenarioReport<'a> {
    scenario: &'a str,
    commission: &'a CommissionStructure,
    performance: &'a PerformanceInput,
    result: &'a CalculationResult,
}

pub fn calculate(config: &ScenarioConfig) -> Result<CalculationResult> {
    if config.calculation.strict() {
        compute_checked(&config.commission, &config.performance)
    } else {
        Ok(compute(&config.commission, &config.performance))
    }
}

/// Renders an already computed result in the scenario's configured format.
pub fn render(config: &ScenarioConfig, result: &CalculationResult) -> Result<String> {
    let precision = config.precision();
    match config.format() {
        "text" => Ok(render_text(result, precision)),
        "json" => render_json(&ScenarioReport {
            scenario: config.name(),
            commission: &config.commission,
            performance: &config.performance,
            result,
        }),
        "csv" => render_csv(
            &[MemberEarnings {
                member_id: config.name().to_string(),
                result: *result,
            }],
            precision,
        ),
        other => Err(EarningsError::InvalidConfigValueError {
            field: "output.format".to_string(),
            value: other.to_string(),
            reason: "Unsupported output format".to_string(),
        }),
    }
}
