use crate::config::toml_config::{substitute_env_vars, CalculationConfig, DEFAULT_PRECISION};
use crate::core::report::OUTPUT_FORMATS;
use crate::core::BatchSettings;
use crate::domain::model::CommissionStructure;
use crate::utils::error::{EarningsError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchMeta,
    #[serde(default)]
    pub commission: CommissionStructure,
    pub source: SourceConfig,
    #[serde(default)]
    pub calculation: CalculationConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMeta {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub precision: Option<usize>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub json: Option<String>,
    pub text: Option<String>,
}

impl BatchConfig {
    /// 從 TOML 檔案載入批次設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&mut self, strict: Option<bool>, input: Option<String>) {
        if let Some(strict) = strict {
            tracing::info!("🔧 Strict mode overridden to: {}", strict);
            self.calculation.strict = Some(strict);
        }
        if let Some(input) = input {
            tracing::info!("🔧 Input overridden to: {}", input);
            self.source.input_path = Some(input);
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;

        let input_path = validate_required_field("source.input_path", &self.source.input_path)?;
        validate_path("source.input_path", input_path)?;

        validate_path("load.output_path", &self.load.output_path)?;

        if self.load.output_formats.is_empty() {
            return Err(EarningsError::InvalidConfigValueError {
                field: "load.output_formats".to_string(),
                value: "[]".to_string(),
                reason: "At least one output format is required".to_string(),
            });
        }
        for format in &self.load.output_formats {
            validate_one_of("load.output_formats", format, &OUTPUT_FORMATS)?;
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl BatchSettings for BatchConfig {
    fn batch_name(&self) -> &str {
        &self.batch.name
    }

    fn commission(&self) -> CommissionStructure {
        self.commission
    }

    fn input_path(&self) -> &str {
        self.source.input_path.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn output_filename(&self, format: &str) -> String {
        let configured = self.load.filenames.as_ref().and_then(|names| match format {
            "csv" => names.csv.clone(),
            "json" => names.json.clone(),
            "text" => names.text.clone(),
            _ => None,
        });

        configured.unwrap_or_else(|| match format {
            "text" => "earnings.txt".to_string(),
            other => format!("earnings.{}", other),
        })
    }

    fn strict(&self) -> bool {
        self.calculation.strict()
    }

    fn skip_invalid_rows(&self) -> bool {
        self.calculation.skip_invalid_rows()
    }

    fn precision(&self) -> usize {
        self.load.precision.unwrap_or(DEFAULT_PRECISION)
    }
}
