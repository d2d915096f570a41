/// Failures of point-sequence mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementError {
    /// `remove_last_point` was called with no points placed.
    EmptySequence,
}

impl std::fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementError::EmptySequence => write!(f, "No points to remove"),
        }
    }
}

impl std::error::Error for MeasurementError {}
