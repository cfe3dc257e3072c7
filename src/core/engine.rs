use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EarningsEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EarningsEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extracts only and returns the number of readable rows; nothing is written.
    pub async fn dry_run(&self) -> Result<usize> {
        let rows = self.pipeline.extract().await?;
        tracing::info!("Dry run: {} member rows readable", rows.len());
        Ok(rows.len())
    }

    /// Runs extract, transform and load in order and returns the written paths.
    pub async fn run(&self) -> Result<Vec<String>> {
        let started = Instant::now();
        tracing::info!("Starting earnings batch");

        let phase = Instant::now();
        let rows = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} member rows in {:?}",
            rows.len(),
            phase.elapsed()
        );

        let phase = Instant::now();
        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Computed earnings for {} members ({} skipped) in {:?}",
            result.earnings.len(),
            result.skipped.len(),
            phase.elapsed()
        );

        let phase = Instant::now();
        let outputs = self.pipeline.load(result).await?;
        tracing::info!("Wrote {} report(s) in {:?}", outputs.len(), phase.elapsed());

        tracing::info!("Earnings batch finished in {:?}", started.elapsed());
        Ok(outputs)
    }
}
