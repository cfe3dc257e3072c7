use crate::domain::model::{BatchResult, CommissionStructure, MemberPerformance};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings a batch run needs, independent of where they were loaded from.
pub trait BatchSettings: Send + Sync {
    fn batch_name(&self) -> &str;
    fn commission(&self) -> CommissionStructure;
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn output_filename(&self, format: &str) -> String;
    fn strict(&self) -> bool;
    fn skip_invalid_rows(&self) -> bool;
    fn precision(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<MemberPerformance>>;
    async fn transform(&self, rows: Vec<MemberPerformance>) -> Result<BatchResult>;
    async fn load(&self, result: BatchResult) -> Result<Vec<String>>;
}
