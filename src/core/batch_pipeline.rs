use crate::core::calculator::{compute, compute_checked};
use crate::core::report::{render_batch_text, render_csv, render_json, BatchReport};
use crate::core::{BatchResult, BatchSettings, Pipeline, Storage};
use crate::domain::model::{
    LeadershipRank, MemberEarnings, MemberPerformance, PerformanceInput, SkippedRow,
};
use crate::utils::error::{EarningsError, Result};
use serde::Deserialize;
use std::path::Path;

/// Flat CSV row; converted into [`MemberPerformance`] after parsing.
#[derive(Debug, Deserialize)]
struct MemberRow {
    member_id: String,
    matrix_level: i64,
    direct_referrals: i64,
    team_size: i64,
    cycles_completed: i64,
    #[serde(default)]
    leadership_rank: LeadershipRank,
    fast_start_qualified: bool,
}

impl From<MemberRow> for MemberPerformance {
    fn from(row: MemberRow) -> Self {
        MemberPerformance {
            member_id: row.member_id,
            performance: PerformanceInput {
                matrix_level: row.matrix_level,
                direct_referrals: row.direct_referrals,
                team_size: row.team_size,
                cycles_completed: row.cycles_completed,
                leadership_rank: row.leadership_rank,
                fast_start_qualified: row.fast_start_qualified,
            },
        }
    }
}

pub fn parse_members_csv(data: &[u8]) -> Result<Vec<MemberPerformance>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.deserialize::<MemberRow>() {
        rows.push(record?.into());
    }
    Ok(rows)
}

pub struct CsvBatchPipeline<S: Storage, C: BatchSettings> {
    storage: S,
    settings: C,
}

impl<S: Storage, C: BatchSettings> CsvBatchPipeline<S, C> {
    pub fn new(storage: S, settings: C) -> Self {
        Self { storage, settings }
    }

    fn output_file(&self, format: &str) -> String {
        let path = Path::new(self.settings.output_path()).join(self.settings.output_filename(format));
        path.to_string_lossy().replace('\\', "/")
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: BatchSettings> Pipeline for CsvBatchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<MemberPerformance>> {
        tracing::debug!("Reading member rows from: {}", self.settings.input_path());
        let data = self.storage.read_file(self.settings.input_path()).await?;
        let rows = parse_members_csv(&data)?;

        if rows.is_empty() {
            tracing::warn!("Input file {} has no member rows", self.settings.input_path());
        }
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<MemberPerformance>) -> Result<BatchResult> {
        let structure = self.settings.commission();
        let mut result = BatchResult::default();

        for row in rows {
            let computed = if self.settings.strict() {
                compute_checked(&structure, &row.performance)
            } else {
                if !row.performance.leadership_rank.is_recognized() {
                    tracing::warn!(
                        "Member {} has unknown rank '{}', leadership bonus is 0",
                        row.member_id,
                        row.performance.leadership_rank
                    );
                }
                Ok(compute(&structure, &row.performance))
            };

            match computed {
                Ok(earnings) => {
                    tracing::debug!(
                        "Member {}: total {:.2}",
                        row.member_id,
                        earnings.total_earnings
                    );
                    result.earnings.push(MemberEarnings {
                        member_id: row.member_id,
                        result: earnings,
                    });
                }
                Err(e) if self.settings.skip_invalid_rows() => {
                    tracing::warn!("Skipping member {}: {}", row.member_id, e);
                    result.skipped.push(SkippedRow {
                        member_id: row.member_id,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!("Member {} rejected: {}", row.member_id, e);
                    return Err(e);
                }
            }
        }

        Ok(result)
    }

    async fn load(&self, result: BatchResult) -> Result<Vec<String>> {
        let precision = self.settings.precision();
        let report = BatchReport::new(
            self.settings.batch_name(),
            self.settings.commission(),
            &result,
        );

        let mut written = Vec::new();
        for format in self.settings.output_formats() {
            let content = match format.as_str() {
                "csv" => render_csv(&result.earnings, precision)?,
                "json" => render_json(&report)?,
                "text" => render_batch_text(&report, precision),
                other => {
                    return Err(EarningsError::InvalidConfigValueError {
                        field: "load.output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            };

            let path = self.output_file(format);
            tracing::debug!("Writing {} report ({} bytes) to {}", format, content.len(), path);
            self.storage.write_file(&path, content.as_bytes()).await?;
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CommissionStructure;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const MEMBERS_CSV: &str = "\
member_id,matrix_level,direct_referrals,team_size,cycles_completed,leadership_rank,fast_start_qualified
M-001,1,0,0,0,None,false
M-002,2,10,20,1,Gold,true
M-003,1,-5,0,0,Emerald,false
";

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EarningsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockSettings {
        formats: Vec<String>,
        strict: bool,
        skip_invalid_rows: bool,
    }

    impl MockSettings {
        fn new(formats: &[&str]) -> Self {
            Self {
                formats: formats.iter().map(|f| f.to_string()).collect(),
                strict: false,
                skip_invalid_rows: false,
            }
        }
    }

    impl BatchSettings for MockSettings {
        fn batch_name(&self) -> &str {
            "test-batch"
        }

        fn commission(&self) -> CommissionStructure {
            CommissionStructure::default()
        }

        fn input_path(&self) -> &str {
            "members.csv"
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn output_filename(&self, format: &str) -> String {
            format!("earnings.{}", if format == "text" { "txt" } else { format })
        }

        fn strict(&self) -> bool {
            self.strict
        }

        fn skip_invalid_rows(&self) -> bool {
            self.skip_invalid_rows
        }

        fn precision(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_parse_members_csv() {
        let rows = parse_members_csv(MEMBERS_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].member_id, "M-002");
        assert_eq!(rows[1].performance.leadership_rank, LeadershipRank::Gold);
        assert!(rows[1].performance.fast_start_qualified);
        assert_eq!(rows[2].performance.direct_referrals, -5);
    }

    #[test]
    fn test_parse_members_csv_rejects_non_numeric_counts() {
        let data = "\
member_id,matrix_level,direct_referrals,team_size,cycles_completed,leadership_rank,fast_start_qualified
M-001,one,0,0,0,None,false
";
        let err = parse_members_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, EarningsError::CsvError(_)));
    }

    #[tokio::test]
    async fn test_lenient_transform_keeps_quirky_rows() {
        let storage = MockStorage::with_file("members.csv", MEMBERS_CSV);
        let pipeline = CsvBatchPipeline::new(storage, MockSettings::new(&["csv"]));

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();

        assert_eq!(result.earnings.len(), 3);
        assert!(result.skipped.is_empty());
        assert!((result.earnings[1].result.total_earnings - 175.5).abs() < 1e-9);
        // negative referrals flow straight through
        assert!(result.earnings[2].result.total_earnings < 0.0);
    }

    #[tokio::test]
    async fn test_strict_transform_fails_on_invalid_row() {
        let storage = MockStorage::with_file("members.csv", MEMBERS_CSV);
        let mut settings = MockSettings::new(&["csv"]);
        settings.strict = true;
        let pipeline = CsvBatchPipeline::new(storage, settings);

        let rows = pipeline.extract().await.unwrap();
        let err = pipeline.transform(rows).await.unwrap_err();
        assert!(matches!(err, EarningsError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_strict_transform_can_skip_invalid_rows() {
        let storage = MockStorage::with_file("members.csv", MEMBERS_CSV);
        let mut settings = MockSettings::new(&["csv"]);
        settings.strict = true;
        settings.skip_invalid_rows = true;
        let pipeline = CsvBatchPipeline::new(storage, settings);

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();

        assert_eq!(result.earnings.len(), 2);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].member_id, "M-003");
        assert!(result.skipped[0].reason.contains("direct_referrals"));
    }

    #[tokio::test]
    async fn test_load_writes_each_requested_format() {
        let storage = MockStorage::with_file("members.csv", MEMBERS_CSV);
        let pipeline =
            CsvBatchPipeline::new(storage.clone(), MockSettings::new(&["csv", "json", "text"]));

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();
        let written = pipeline.load(result).await.unwrap();

        assert_eq!(
            written,
            vec!["out/earnings.csv", "out/earnings.json", "out/earnings.txt"]
        );

        let csv = storage.get_file("out/earnings.csv").await.unwrap();
        assert!(csv.contains("M-002,40.00,50.00,1.50,50.00,25.00,9.00,175.50,702.00,8424.00"));

        let json = storage.get_file("out/earnings.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["members"], 3);
        assert_eq!(value["summary"]["top_earner"]["member_id"], "M-002");

        let text = storage.get_file("out/earnings.txt").await.unwrap();
        assert!(text.contains("Batch: test-batch"));
    }

    #[tokio::test]
    async fn test_extract_missing_input_is_io_error() {
        let storage = MockStorage::with_file("other.csv", MEMBERS_CSV);
        let pipeline = CsvBatchPipeline::new(storage, MockSettings::new(&["csv"]));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EarningsError::IoError(_)));
    }
}
