use crate::utils::error::{EarningsError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EarningsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EarningsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EarningsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EarningsError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EarningsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 計算輸入：計數欄位不可為負
pub fn validate_non_negative_count(field_name: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(EarningsError::invalid_input(
            field_name,
            value,
            "Count must not be negative",
        ));
    }
    Ok(())
}

/// 計算輸入：費率必須是有限且非負的數字
pub fn validate_rate(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EarningsError::invalid_input(
            field_name,
            value,
            "Rate must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(EarningsError::invalid_input(
            field_name,
            value,
            "Rate must not be negative",
        ));
    }
    Ok(())
}

pub fn validate_min_count(field_name: &str, value: i64, min: i64) -> Result<()> {
    if value < min {
        return Err(EarningsError::invalid_input(
            field_name,
            value,
            format!("Value must be at least {}", min),
        ));
    }
    Ok(())
}
