use thiserror::Error;

#[derive(Error, Debug)]
pub enum SizingError {
    #[error("Invalid input for {field} ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cable catalog error: {message}")]
    CatalogError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Catalog,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SizingError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SizingError::InvalidInput { .. } => ErrorCategory::Input,
            SizingError::CatalogError { .. } => ErrorCategory::Catalog,
            SizingError::ConfigValidationError { .. }
            | SizingError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SizingError::IoError(_)
            | SizingError::SerializationError(_)
            | SizingError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SizingError::SerializationError(_) | SizingError::CsvError(_) => ErrorSeverity::Medium,
            SizingError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SizingError::InvalidInput { field, .. } => match field.as_str() {
                "voltage" => "Supply voltage must be a positive number of volts".to_string(),
                "power" => "Load power must be a positive number of kVA".to_string(),
                "length" => "Cable length is the one-way run in metres and cannot be negative"
                    .to_string(),
                _ => format!("Check the value given for '{}'", field),
            },
            SizingError::CatalogError { .. } => {
                "Every cable needs a unique cross-section with positive resistance and ampacity"
                    .to_string()
            }
            SizingError::ConfigValidationError { .. } => {
                "Make sure the configuration file exists and is valid TOML".to_string()
            }
            SizingError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            SizingError::IoError(_) => "Check file paths and permissions".to_string(),
            SizingError::SerializationError(_) | SizingError::CsvError(_) => {
                "Retry with --format text".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SizingError::InvalidInput { field, value, reason } => {
                format!("The {} value '{}' cannot be used: {}", field, value, reason)
            }
            SizingError::CatalogError { message } => {
                format!("The cable table is not usable: {}", message)
            }
            SizingError::ConfigValidationError { message, .. } => {
                format!("Could not read the configuration: {}", message)
            }
            SizingError::InvalidConfigValueError { field, value, reason } => {
                format!("Configuration value {} = '{}' is invalid: {}", field, value, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SizingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_classification() {
        let err = SizingError::invalid_input("voltage", 0.0, "must be greater than zero");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("voltage"));
        assert!(err.recovery_suggestion().contains("voltage"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: SizingError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
