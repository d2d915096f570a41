use super::point::MeasurementPoint;
use serde::{Deserialize, Serialize};

/// Snapshot of the derived geometry for the current point sequence.
///
/// Values that need more points than are placed are `None` and serialize
/// as `null`, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub points: Vec<MeasurementPoint>,
    pub area: Option<f64>,
    pub perimeter: Option<f64>,
    pub distances: Option<Vec<f64>>,
}
