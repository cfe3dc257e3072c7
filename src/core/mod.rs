pub mod batch_pipeline;
pub mod calculator;
pub mod engine;
pub mod report;
pub mod scenario;

pub use crate::domain::model::{BatchResult, MemberPerformance};
pub use crate::domain::ports::{BatchSettings, Pipeline, Storage};
pub use crate::utils::error::Result;
