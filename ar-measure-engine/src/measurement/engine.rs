use super::error::MeasurementError;
use super::geometry::{consecutive_distances, shoelace_area_xz};
use super::point::{MeasurementPoint, PointId};
use super::result::MeasurementResult;
use bevy::log::debug;
use bevy::math::DVec3;
use constants::measurement::{FIRST_POINT_ID, MIN_POINTS_FOR_AREA, MIN_POINTS_FOR_DISTANCE};

/// Ordered sequence of placed points with monotonic id assignment.
///
/// Ids are never handed out twice between clears. `clear` resets the id
/// counter and bumps the epoch, so `(epoch, id)` identifies a point across
/// the whole session.
#[derive(Debug, Clone)]
pub struct MeasurementEngine {
    points: Vec<MeasurementPoint>,
    next_id: PointId,
    epoch: u64,
}

impl Default for MeasurementEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementEngine {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            next_id: FIRST_POINT_ID,
            epoch: 0,
        }
    }

    /// Append a point at `position` and return it.
    pub fn add_point(&mut self, position: DVec3) -> MeasurementPoint {
        let point = MeasurementPoint::new(self.next_id, position);
        self.next_id += 1;
        self.points.push(point);
        debug!(
            "Point {} added at ({}, {}, {})",
            point.id, point.x, point.y, point.z
        );
        point
    }

    /// Pop the most recent point. The id counter is left untouched.
    pub fn remove_last_point(&mut self) -> Result<MeasurementPoint, MeasurementError> {
        let point = self.points.pop().ok_or(MeasurementError::EmptySequence)?;
        debug!("Point {} removed", point.id);
        Ok(point)
    }

    /// Drop every point and restart ids from the first id.
    pub fn clear(&mut self) {
        self.points.clear();
        self.next_id = FIRST_POINT_ID;
        self.epoch += 1;
        debug!("Points cleared, epoch {}", self.epoch);
    }

    pub fn compute_measurement(&self) -> MeasurementResult {
        let points = self.points.clone();
        if points.len() < MIN_POINTS_FOR_DISTANCE {
            return MeasurementResult {
                points,
                ..Default::default()
            };
        }

        let distances = consecutive_distances(&points);
        let mut perimeter: f64 = distances.iter().sum();
        let mut area = None;

        if points.len() >= MIN_POINTS_FOR_AREA {
            area = Some(shoelace_area_xz(&points));
            let (first, last) = (&points[0], &points[points.len() - 1]);
            perimeter += last.distance(first);
        }

        MeasurementResult {
            points,
            area,
            perimeter: Some(perimeter),
            distances: Some(distances),
        }
    }

    pub fn points(&self) -> &[MeasurementPoint] {
        &self.points
    }

    pub fn last_point(&self) -> Option<&MeasurementPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Id the next `add_point` will assign.
    pub fn next_id(&self) -> PointId {
        self.next_id
    }

    /// Number of clears since construction.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
