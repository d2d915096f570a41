use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

/// Identity of a placed point, unique within one sequence epoch.
pub type PointId = u32;

/// A point placed on a detected surface, in metres of AR world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MeasurementPoint {
    pub fn new(id: PointId, position: DVec3) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            z: position.z,
        }
    }

    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Straight-line 3D distance to `other`.
    pub fn distance(&self, other: &MeasurementPoint) -> f64 {
        self.position().distance(other.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_uses_all_three_axes() {
        let a = MeasurementPoint::new(1, DVec3::ZERO);
        let b = MeasurementPoint::new(2, DVec3::new(1.0, 2.0, 2.0));
        assert!((a.distance(&b) - 3.0).abs() < 1e-12);
        assert!((b.distance(&a) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn serializes_as_flat_id_and_coordinates() {
        let p = MeasurementPoint::new(7, DVec3::new(0.5, -1.0, 2.25));
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 7, "x": 0.5, "y": -1.0, "z": 2.25 })
        );
    }
}
