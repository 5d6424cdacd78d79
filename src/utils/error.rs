use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Feed returned HTTP {status}")]
    FeedStatus { status: u16 },

    #[error("Feed is not a valid earthquake collection: {0}")]
    FeedParse(#[source] serde_json::Error),

    #[error("Malformed feature #{index}: {reason}")]
    MalformedFeature { index: usize, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::Fetch(_) | MapError::FeedStatus { .. } => ErrorCategory::Network,
            MapError::FeedParse(_)
            | MapError::MalformedFeature { .. }
            | MapError::SerializationError(_) => ErrorCategory::Data,
            MapError::ConfigError { .. }
            | MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MapError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 取資料失敗時地圖仍會輸出
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MapError::Fetch(_) => "Check network connectivity and the feed URL",
            MapError::FeedStatus { .. } => "The feed server rejected the request; try again later",
            MapError::FeedParse(_) => "Make sure the feed URL points at a GeoJSON FeatureCollection",
            MapError::MalformedFeature { .. } => {
                "Use --on-malformed skip to drop incomplete earthquake records"
            }
            MapError::IoError(_) => "Check that the output directory is writable",
            MapError::SerializationError(_) => "Report this as a bug",
            MapError::ConfigError { .. }
            | MapError::ConfigValidationError { .. }
            | MapError::InvalidConfigValueError { .. }
            | MapError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download earthquake data: {}", self),
            ErrorCategory::Data => format!("Earthquake data could not be used: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_errors_are_recoverable() {
        let err = MapError::FeedStatus { status: 503 };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "Feed returned HTTP 503");
    }

    #[test]
    fn test_config_errors_map_to_exit_code_one() {
        let err = MapError::MissingConfigError {
            field: "feed.url".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_io_error_maps_to_exit_code_three() {
        let err = MapError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "quake-map.toml",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_parse_error_is_data_category() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = MapError::FeedParse(parse);
        assert_eq!(err.category(), ErrorCategory::Data);
    }
}
