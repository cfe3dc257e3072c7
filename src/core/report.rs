use crate::domain::model::{
    BatchResult, CalculationResult, CommissionStructure, MemberEarnings, SkippedRow,
};
use crate::utils::error::{EarningsError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const OUTPUT_FORMATS: [&str; 3] = ["text", "json", "csv"];

pub const CSV_HEADER: [&str; 10] = [
    "member_id",
    "matrix_bonus",
    "referral_bonus",
    "matching_bonus",
    "cycle_bonus",
    "fast_start_bonus",
    "leadership_bonus",
    "total_earnings",
    "monthly",
    "yearly",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopEarner {
    pub member_id: String,
    pub total_earnings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub members: usize,
    pub skipped: usize,
    pub total_earnings: f64,
    pub top_earner: Option<TopEarner>,
}

impl BatchSummary {
    pub fn from_result(result: &BatchResult) -> Self {
        let total_earnings = result
            .earnings
            .iter()
            .map(|e| e.result.total_earnings)
            .sum();

        // 同分時保留最先出現的會員
        let top_earner = result
            .earnings
            .iter()
            .fold(None::<&MemberEarnings>, |best, candidate| match best {
                Some(b) if b.result.total_earnings >= candidate.result.total_earnings => Some(b),
                _ => Some(candidate),
            })
            .map(|e| TopEarner {
                member_id: e.member_id.clone(),
                total_earnings: e.result.total_earnings,
            });

        Self {
            members: result.earnings.len(),
            skipped: result.skipped.len(),
            total_earnings,
            top_earner,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport<'a> {
    pub batch: &'a str,
    pub generated_at: DateTime<Utc>,
    pub commission: CommissionStructure,
    pub summary: BatchSummary,
    pub results: &'a [MemberEarnings],
    pub skipped: &'a [SkippedRow],
}

impl<'a> BatchReport<'a> {
    pub fn new(batch: &'a str, commission: CommissionStructure, result: &'a BatchResult) -> Self {
        Self {
            batch,
            generated_at: Utc::now(),
            commission,
            summary: BatchSummary::from_result(result),
            results: &result.earnings,
            skipped: &result.skipped,
        }
    }
}

fn fmt_amount(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

pub fn render_text(result: &CalculationResult, precision: usize) -> String {
    let mut lines = Vec::with_capacity(12);
    for (name, value) in result.breakdown.components() {
        lines.push(format!("{:<18} {:>14}", name, fmt_amount(value, precision)));
    }
    lines.push("-".repeat(33));
    lines.push(format!(
        "{:<18} {:>14}",
        "total_earnings",
        fmt_amount(result.total_earnings, precision)
    ));
    lines.push(format!(
        "{:<18} {:>14}",
        "monthly",
        fmt_amount(result.projections.monthly, precision)
    ));
    lines.push(format!(
        "{:<18} {:>14}",
        "yearly",
        fmt_amount(result.projections.yearly, precision)
    ));
    lines.join("\n")
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_csv(earnings: &[MemberEarnings], precision: usize) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for entry in earnings {
        let result = &entry.result;
        let mut record = Vec::with_capacity(CSV_HEADER.len());
        record.push(entry.member_id.clone());
        for (_, value) in result.breakdown.components() {
            record.push(fmt_amount(value, precision));
        }
        record.push(fmt_amount(result.total_earnings, precision));
        record.push(fmt_amount(result.projections.monthly, precision));
        record.push(fmt_amount(result.projections.yearly, precision));
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EarningsError::ProcessingError {
            message: format!("Failed to flush CSV output: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| EarningsError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn render_batch_text(report: &BatchReport<'_>, precision: usize) -> String {
    let mut lines = vec![
        format!("Batch: {}", report.batch),
        format!("Generated at: {}", report.generated_at.to_rfc3339()),
        format!("Members: {}", report.summary.members),
        format!("Skipped rows: {}", report.summary.skipped),
        format!(
            "Total earnings: {}",
            fmt_amount(report.summary.total_earnings, precision)
        ),
    ];

    if let Some(top) = &report.summary.top_earner {
        lines.push(format!(
            "Top earner: {} ({})",
            top.member_id,
            fmt_amount(top.total_earnings, precision)
        ));
    }

    for entry in report.results {
        lines.push(String::new());
        lines.push(format!("[{}]", entry.member_id));
        lines.push(render_text(&entry.result, precision));
    }

    for skipped in report.skipped {
        lines.push(format!("skipped {}: {}", skipped.member_id, skipped.reason));
    }

    lines.join("\n")
}
