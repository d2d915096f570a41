//! Distance, perimeter and footprint area over an ordered point path.

use super::point::MeasurementPoint;
use constants::coordinate_system::ground_projection;

/// Distances between each point and its successor, `points.len() - 1` entries.
pub fn consecutive_distances(points: &[MeasurementPoint]) -> Vec<f64> {
    points.windows(2).map(|w| w[0].distance(&w[1])).collect()
}

/// Area of the polygon's projection onto the horizontal x–z plane.
///
/// Shoelace formula with wrap-around indexing. Height is ignored, so a
/// non-planar loop yields its footprint area rather than a surface area.
pub fn shoelace_area_xz(points: &[MeasurementPoint]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, z0) = ground_projection(points[i].x, points[i].y, points[i].z);
        let next = &points[(i + 1) % n];
        let (x1, z1) = ground_projection(next.x, next.y, next.z);
        sum += x0 * z1 - x1 * z0;
    }
    sum.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec3;

    fn path(coords: &[(f64, f64, f64)]) -> Vec<MeasurementPoint> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y, z))| {
                MeasurementPoint::new(i as u32 + 1, DVec3::new(x, y, z))
            })
            .collect()
    }

    #[test]
    fn consecutive_distances_count() {
        let pts = path(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 0.0, 1.0),
            (0.0, 0.0, 1.0),
        ]);
        assert_eq!(consecutive_distances(&pts), vec![1.0, 1.0, 1.0]);
        assert!(consecutive_distances(&pts[..1]).is_empty());
        assert!(consecutive_distances(&[]).is_empty());
    }

    #[test]
    fn rectangle_area() {
        let pts = path(&[
            (0.0, 0.0, 0.0),
            (4.0, 0.0, 0.0),
            (4.0, 0.0, 3.0),
            (0.0, 0.0, 3.0),
        ]);
        assert!((shoelace_area_xz(&pts) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn area_ignores_height() {
        let flat = path(&[(0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (0.0, 0.0, 2.0)]);
        let tilted = path(&[(0.0, 5.0, 0.0), (2.0, -1.0, 0.0), (0.0, 3.0, 2.0)]);
        assert_eq!(shoelace_area_xz(&flat), shoelace_area_xz(&tilted));
        assert!((shoelace_area_xz(&flat) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn area_invariant_under_reversal_and_rotation() {
        let coords = [
            (0.0, 0.0, 0.0),
            (5.0, 0.3, 1.0),
            (6.0, 0.0, 4.0),
            (2.0, 0.1, 6.0),
            (-1.0, 0.0, 3.0),
        ];
        let forward = path(&coords);
        let expected = shoelace_area_xz(&forward);

        let mut reversed = coords.to_vec();
        reversed.reverse();
        assert!((shoelace_area_xz(&path(&reversed)) - expected).abs() < 1e-9);

        for shift in 1..coords.len() {
            let mut rotated = coords.to_vec();
            rotated.rotate_left(shift);
            assert!((shoelace_area_xz(&path(&rotated)) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn collinear_points_have_zero_area() {
        let pts = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        assert_eq!(shoelace_area_xz(&pts), 0.0);
    }
}
