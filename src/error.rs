use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpacingError>;

#[derive(Error, Debug)]
pub enum SpacingError {
    #[error("unknown airfield {0}")]
    UnknownAirfield(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error {0}")]
    Json(#[from] serde_json::Error),
}

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::error::SpacingError::InvalidConfig( format!( $fmt $(, $arg)* ))
    };
}
pub(crate) use config_error;

/// rejects negative, NaN and infinite distances
pub(crate) fn check_distance(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(config_error!("{what} must be a non-negative distance, got {value}"))
    }
}
