use thiserror::Error;

#[derive(Error, Debug)]
pub enum TravelyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid stop {stop_id}: {reason}")]
    InvalidStop { stop_id: u32, reason: String },

    #[error("Invalid route: {reason}")]
    InvalidRoute { reason: String },

    #[error("Invalid price item {item_id}: {reason}")]
    InvalidPriceItem { item_id: u32, reason: String },

    #[error("Stop {stop_id} does not exist in this route")]
    UnknownStop { stop_id: u32 },

    #[error("Price item {item_id} does not exist in this route")]
    UnknownPriceItem { item_id: u32 },

    #[error("Position {position} is out of range for a route with {len} stops")]
    InvalidPosition { position: usize, len: usize },

    #[error("Catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Catalog,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TravelyError {
    pub fn validation(message: impl Into<String>) -> Self {
        TravelyError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TravelyError::InvalidStop { .. }
            | TravelyError::InvalidRoute { .. }
            | TravelyError::InvalidPriceItem { .. }
            | TravelyError::UnknownStop { .. }
            | TravelyError::UnknownPriceItem { .. }
            | TravelyError::InvalidPosition { .. }
            | TravelyError::ValidationError { .. } => ErrorCategory::Validation,
            TravelyError::ConfigError { .. }
            | TravelyError::InvalidConfigValueError { .. }
            | TravelyError::MissingConfigError { .. }
            | TravelyError::TomlError(_) => ErrorCategory::Configuration,
            TravelyError::CatalogUnavailable { .. } => ErrorCategory::Catalog,
            TravelyError::IoError(_)
            | TravelyError::CsvError(_)
            | TravelyError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Catalog => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("The itinerary data is invalid: {}", self),
            ErrorCategory::Configuration => format!("The configuration could not be used: {}", self),
            ErrorCategory::Catalog => format!("The destination catalog could not be loaded: {}", self),
            ErrorCategory::System => format!("A system error occurred: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TravelyError::InvalidStop { .. } => {
                "Check the stop's night count and dates; nights must be non-negative and match the date span"
            }
            TravelyError::InvalidRoute { .. } => {
                "Make sure exactly the first stop is marked as the start and ids are unique"
            }
            TravelyError::InvalidPriceItem { .. } => {
                "Price items need a non-negative price and must reference an existing stop"
            }
            TravelyError::UnknownStop { .. } | TravelyError::UnknownPriceItem { .. } => {
                "List the route first to see which ids exist"
            }
            TravelyError::InvalidPosition { .. } => "Use a position between 0 and the number of stops",
            TravelyError::TomlError(_)
            | TravelyError::ConfigError { .. }
            | TravelyError::InvalidConfigValueError { .. }
            | TravelyError::MissingConfigError { .. } => {
                "Fix the configuration file and run again"
            }
            TravelyError::CatalogUnavailable { .. } => {
                "Check the catalog path or switch to the built-in sample catalog"
            }
            TravelyError::IoError(_) => "Check that the file exists and is readable",
            TravelyError::CsvError(_) | TravelyError::SerializationError(_) => {
                "Check that the output destination is writable"
            }
            TravelyError::ValidationError { .. } => "Correct the rejected value and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, TravelyError>;
