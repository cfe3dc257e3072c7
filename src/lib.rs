pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{
    batch_config::BatchConfig, cli::LocalStorage, toml_config::ScenarioConfig,
};
pub use crate::core::{
    batch_pipeline::CsvBatchPipeline,
    calculator::{compute, compute_checked},
    engine::EarningsEngine,
};
pub use crate::domain::model::{
    CalculationResult, CommissionStructure, EarningsBreakdown, LeadershipRank, PerformanceInput,
    Projections,
};
pub use crate::utils::error::{EarningsError, Result};
