use crate::utils::error::{Result, SizingError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SizingError::invalid_input(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    Ok(())
}

pub fn validate_positive_real(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(SizingError::invalid_input(
            field_name,
            value,
            "Value must be greater than zero",
        ));
    }
    Ok(())
}

pub fn validate_non_negative_real(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(SizingError::invalid_input(
            field_name,
            value,
            "Value cannot be negative",
        ));
    }
    Ok(())
}

/// Open at the bottom, closed at the top: `min < value <= max`.
pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= min || value > max {
        return Err(SizingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be greater than {} and at most {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SizingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SizingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
