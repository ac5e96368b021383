use thiserror::Error;

/// Raised when a wire label does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    #[error("invalid blood type: {0}")]
    BloodType(String),
    #[error("invalid unit status: {0}")]
    UnitStatus(String),
    #[error("invalid request status: {0}")]
    RequestStatus(String),
}

/// Raised when a form draft is submitted without its required fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}
