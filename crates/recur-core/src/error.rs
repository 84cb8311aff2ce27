use thiserror::Error;

/// Failures raised while assembling a single record.
///
/// These are deterministic input violations: retrying with the same input
/// always fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Recurrence rule produced no occurrences")]
    EmptyRecurrence,

    #[error("Invalid ISO weekday number: {0} (expected 1-7)")]
    InvalidWeekday(u32),

    #[error("Invalid repeat index: {0} (must be zero or positive)")]
    InvalidRepeatIndex(i64),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to project occurrence {occurrence} of rule '{rule}'")]
    Projection {
        occurrence: String,
        rule: String,
        #[source]
        source: ProjectionError,
    },

    #[error("Invalid RRULE: {0}")]
    InvalidRRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// The underlying projection failure, if this error came from record assembly.
    pub fn projection_kind(&self) -> Option<&ProjectionError> {
        match self {
            CoreError::Projection { source, .. } => Some(source),
            _ => None,
        }
    }
}
