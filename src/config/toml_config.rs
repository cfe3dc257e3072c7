use crate::core::report::OUTPUT_FORMATS;
use crate::domain::model::{CommissionStructure, PerformanceInput};
use crate::utils::error::{EarningsError, Result};
use crate::utils::validation::{validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FORMAT: &str = "text";
pub const DEFAULT_PRECISION: usize = 2;

/// Single-member scenario file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub scenario: ScenarioMeta,
    #[serde(default)]
    pub commission: CommissionStructure,
    #[serde(default)]
    pub performance: PerformanceInput,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub calculation: CalculationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub precision: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationConfig {
    pub strict: Option<bool>,
    pub skip_invalid_rows: Option<bool>,
}

impl CalculationConfig {
    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    pub fn skip_invalid_rows(&self) -> bool {
        self.skip_invalid_rows.unwrap_or(false)
    }
}

/// 替換環境變數 (例如 ${TEAM_SIZE})；未設定的變數保持原樣
pub(crate) fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EarningsError::ConfigValidationError {
        field: "environment".to_string(),
        message: format!("Invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    pub fn format(&self) -> &str {
        self.output.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    pub fn precision(&self) -> usize {
        self.output.precision.unwrap_or(DEFAULT_PRECISION)
    }

    pub fn name(&self) -> &str {
        self.scenario.name.as_deref().unwrap_or("scenario")
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validate_one_of("output.format", self.format(), &OUTPUT_FORMATS)?;
        // 費率與績效的檢查交給 strict 模式，這裡不拒絕負值
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LeadershipRank;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_scenario() {
        let toml_content = r#"
[scenario]
name = "gold-member"

[commission]
matrix_bonus = 10
referral_bonus = 5
matching_bonus = 3
cycle_bonus = 50
fast_start_bonus = 25
leadership_bonus = 15

[performance]
matrix_level = 2
direct_referrals = 10
team_size = 20
cycles_completed = 1
leadership_rank = "Gold"
fast_start_qualified = true

[output]
format = "json"
precision = 4
"#;

        let config = ScenarioConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.name(), "gold-member");
        assert_eq!(config.commission, CommissionStructure::default());
        assert_eq!(config.performance.leadership_rank, LeadershipRank::Gold);
        assert_eq!(config.performance.team_size, 20);
        assert_eq!(config.format(), "json");
        assert_eq!(config.precision(), 4);
        assert!(!config.calculation.strict());
    }

    #[test]
    fn test_missing_tables_fall_back_to_defaults() {
        let config = ScenarioConfig::from_toml_str(
            r#"
[commission]
cycle_bonus = 75.5
"#,
        )
        .unwrap();

        assert_eq!(config.commission.cycle_bonus, 75.5);
        assert_eq!(config.commission.matrix_bonus, 10.0);
        assert_eq!(config.performance, PerformanceInput::default());
        assert_eq!(config.format(), DEFAULT_FORMAT);
        assert_eq!(config.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MLM_TEST_TEAM_SIZE", "42");

        let config = ScenarioConfig::from_toml_str(
            r#"
[performance]
team_size = ${MLM_TEST_TEAM_SIZE}
"#,
        )
        .unwrap();
        assert_eq!(config.performance.team_size, 42);

        std::env::remove_var("MLM_TEST_TEAM_SIZE");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let out = substitute_env_vars("rank = \"${MLM_TEST_SURELY_UNSET}\"").unwrap();
        assert_eq!(out, "rank = \"${MLM_TEST_SURELY_UNSET}\"");
    }

    #[test]
    fn test_unsupported_format_fails_validation() {
        let config = ScenarioConfig::from_toml_str(
            r#"
[output]
format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_values_parse_without_error() {
        let config = ScenarioConfig::from_toml_str(
            r#"
[performance]
direct_referrals = -5
leadership_rank = "Emerald"
"#,
        )
        .unwrap();

        assert_eq!(config.performance.direct_referrals, -5);
        assert!(!config.performance.leadership_rank.is_recognized());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_toml_error() {
        let err = ScenarioConfig::from_toml_str("[performance\nteam_size = 1").unwrap_err();
        assert!(matches!(err, EarningsError::TomlError(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_scenario_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[scenario]\nname = \"file-test\"\n")
            .unwrap();

        let config = ScenarioConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.name(), "file-test");
    }
}
