//! Error taxonomy for the dashboard.
//!
//! Per-entity fetch failures and stale passes are recovered inside a render
//! pass; only control and configuration errors reach callers.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Root error type for the entire application
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Validation(ValidationError),
    Control(ControlError),
    Fetch(FetchError),
    Render(RenderError),
    Configuration(ConfigurationError),
}

/// Rejected domain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyEntityCode,
    EmptyIndicatorKey,
}

/// An indicator or chart-type change that names an unknown value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    UnknownIndicator(String),
    UnknownChartType(String),
}

/// Why a single entity's series could not be obtained
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    Network(String),
    HttpStatus { status: u16, status_text: String },
    MalformedPayload(String),
    Service(String),
    EmptySeries,
    UnknownIndicator(String),
    Timeout { timeout_ms: u32 },
}

/// Failures reported by the chart or map surfaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    SurfaceUnavailable(String),
    Serialization(String),
    Library(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    InvalidJson(String),
    NoIndicators,
    DuplicateIndicator(String),
    UnknownDefaultIndicator(String),
    EmptyBaseUrl,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::Validation(e) => write!(f, "Validation Error: {}", e),
            AppError::Control(e) => write!(f, "Control Error: {}", e),
            AppError::Fetch(e) => write!(f, "Fetch Error: {}", e),
            AppError::Render(e) => write!(f, "Render Error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration Error: {}", e),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ValidationError::EmptyEntityCode => write!(f, "entity code cannot be empty"),
            ValidationError::EmptyIndicatorKey => write!(f, "indicator key cannot be empty"),
        }
    }
}

impl Display for ControlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ControlError::UnknownIndicator(raw) => write!(f, "unknown indicator '{}'", raw),
            ControlError::UnknownChartType(raw) => write!(f, "unknown chart type '{}'", raw),
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FetchError::Network(msg) => write!(f, "request failed: {}", msg),
            FetchError::HttpStatus { status, status_text } => {
                write!(f, "HTTP error: {} - {}", status, status_text)
            }
            FetchError::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
            FetchError::Service(msg) => write!(f, "data service error: {}", msg),
            FetchError::EmptySeries => write!(f, "no data points returned"),
            FetchError::UnknownIndicator(key) => write!(f, "no remote series for indicator '{}'", key),
            FetchError::Timeout { timeout_ms } => write!(f, "request timed out after {} ms", timeout_ms),
        }
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RenderError::SurfaceUnavailable(msg) => write!(f, "surface unavailable: {}", msg),
            RenderError::Serialization(msg) => write!(f, "could not serialize chart: {}", msg),
            RenderError::Library(msg) => write!(f, "chart library error: {}", msg),
        }
    }
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigurationError::InvalidJson(msg) => write!(f, "invalid configuration JSON: {}", msg),
            ConfigurationError::NoIndicators => write!(f, "at least one indicator must be configured"),
            ConfigurationError::DuplicateIndicator(key) => write!(f, "indicator '{}' is configured twice", key),
            ConfigurationError::UnknownDefaultIndicator(key) => {
                write!(f, "default indicator '{}' is not registered", key)
            }
            ConfigurationError::EmptyBaseUrl => write!(f, "data service base URL cannot be empty"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ValidationError {}
impl std::error::Error for ControlError {}
impl std::error::Error for FetchError {}
impl std::error::Error for RenderError {}
impl std::error::Error for ConfigurationError {}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error)
    }
}

impl From<ControlError> for AppError {
    fn from(error: ControlError) -> Self {
        AppError::Control(error)
    }
}

impl From<FetchError> for AppError {
    fn from(error: FetchError) -> Self {
        AppError::Fetch(error)
    }
}

impl From<RenderError> for AppError {
    fn from(error: RenderError) -> Self {
        AppError::Render(error)
    }
}

impl From<ConfigurationError> for AppError {
    fn from(error: ConfigurationError) -> Self {
        AppError::Configuration(error)
    }
}

// Simple convenience type aliases
pub type FetchOutcome<T> = Result<T, FetchError>;
pub type RenderResult<T> = Result<T, RenderError>;
