use thiserror::Error;

#[derive(Error, Debug)]
pub enum EarningsError {
    #[error("Invalid input for '{field}' (value: {value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' (value: {value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EarningsError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        EarningsError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EarningsError::InvalidInput { .. } | EarningsError::CsvError(_) => ErrorCategory::Input,
            EarningsError::TomlError(_)
            | EarningsError::ConfigValidationError { .. }
            | EarningsError::InvalidConfigValueError { .. }
            | EarningsError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EarningsError::IoError(_) => ErrorCategory::Storage,
            EarningsError::SerializationError(_) | EarningsError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EarningsError::InvalidInput { field, .. } => format!(
                "Check the value of '{}' or run without --strict to accept it as-is",
                field
            ),
            EarningsError::CsvError(_) => {
                "Make sure the input CSV has the expected header and one member per row".to_string()
            }
            EarningsError::IoError(_) => {
                "Check that the path exists and is readable/writable".to_string()
            }
            EarningsError::TomlError(_) | EarningsError::ConfigValidationError { .. } => {
                "Make sure the file is valid TOML and matches the documented layout".to_string()
            }
            EarningsError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            EarningsError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            EarningsError::SerializationError(_) | EarningsError::ProcessingError { .. } => {
                "Re-run with --verbose to see which record failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Input rejected: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("File access failed: {}", self),
            ErrorCategory::Processing => format!("Calculation failed: {}", self),
        }
    }

    /// 對應 CLI 結束碼；一律非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EarningsError>;
