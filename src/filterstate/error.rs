use crate::model::RangeType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// A bracket-form select value that is not a valid JSON array literal.
    #[error("Invalid filter value for '{key}': {value} ({source})")]
    MalformedValue {
        key: String,
        value: String,
        #[source]
        source: serde_json::Error,
    },

    /// A range bound that cannot be parsed as the filter's declared type.
    #[error("Invalid {expected} bound for '{key}': {value}")]
    InvalidBound {
        key: String,
        value: String,
        expected: RangeType,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl FilterError {
    /// Errors caused by what the client submitted rather than by the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FilterError::MalformedValue { .. } | FilterError::InvalidBound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
