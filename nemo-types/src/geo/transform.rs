//! Batch conversions between geographic and cartesian coordinates.
//!
//! All functions return `None` if any single point cannot be converted (non-finite input or
//! output), in which case nothing is converted.

use crate::cartesian::Point3;
use crate::geo::impls::projection::{ShiftProjection, SphereProjection};
use crate::geo::impls::GeoPoint2d;
use crate::geo::traits::projection::Projection;

/// Converts geographic points into points on the sphere of the given radius.
pub fn to_cartesian(points: &[GeoPoint2d], radius: f64) -> Option<Vec<Point3>> {
    let projection = SphereProjection::new(radius);
    points.iter().map(|p| projection.project(p)).collect()
}

/// Converts cartesian points into geographic points.
///
/// `radius` is accepted for symmetry with [`to_cartesian`]: only the direction of a point
/// determines its latitude and longitude.
pub fn to_geographic(points: &[Point3], radius: f64) -> Option<Vec<GeoPoint2d>> {
    let projection = SphereProjection::new(radius);
    points.iter().map(|p| projection.unproject(p)).collect()
}

/// Applies a [`ShiftProjection`] with the given offsets to every point.
///
/// `shift(&shift(points, a, b)?, -a, -b)` restores the original points.
pub fn shift(points: &[GeoPoint2d], lat_shift: f64, lon_shift: f64) -> Option<Vec<GeoPoint2d>> {
    let projection = ShiftProjection::new(lat_shift, lon_shift);
    points.iter().map(|p| projection.project(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::CartesianPoint3d;
    use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
    use approx::assert_abs_diff_eq;

    const R: f64 = 6_378_137.0;

    fn grid() -> Vec<GeoPoint2d> {
        let mut points = vec![];
        for lat in (-85..=85).step_by(17) {
            for lon in (-175..=175).step_by(25) {
                points.push(GeoPoint2d::latlon(lat as f64 + 0.25, lon as f64 - 0.5));
            }
        }
        points
    }

    #[test]
    fn cartesian_round_trip() {
        let points = grid();
        let cartesian = to_cartesian(&points, R).unwrap();
        let restored = to_geographic(&cartesian, R).unwrap();

        for (original, restored) in points.iter().zip(&restored) {
            assert_abs_diff_eq!(original, restored, epsilon = 1e-9);
        }
    }

    #[test]
    fn round_trip_at_singularities() {
        let north = to_geographic(&to_cartesian(&[GeoPoint2d::latlon(90.0, 0.0)], R).unwrap(), R)
            .unwrap();
        assert_abs_diff_eq!(north[0].lat(), 90.0, epsilon = 1e-9);

        let south = to_geographic(&to_cartesian(&[GeoPoint2d::latlon(-90.0, 0.0)], R).unwrap(), R)
            .unwrap();
        assert_abs_diff_eq!(south[0].lat(), -90.0, epsilon = 1e-9);

        // 180 and -180 are the same meridian, atan2 may return either
        let antimeridian =
            to_geographic(&to_cartesian(&[GeoPoint2d::latlon(10.0, 180.0)], R).unwrap(), R)
                .unwrap();
        assert_abs_diff_eq!(antimeridian[0].lat(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(antimeridian[0].lon().abs(), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn points_lie_on_sphere() {
        for radius in [1.0, R] {
            for point in to_cartesian(&grid(), radius).unwrap() {
                let relative = (point.magnitude_sq() - radius * radius).abs() / (radius * radius);
                assert!(relative < 1e-12, "{point:?} is not on the sphere of radius {radius}");
            }
        }
    }

    #[test]
    fn shift_inverse_law() {
        let points = grid();
        for (a, b) in [(45.0, 90.0), (-30.0, 200.0), (179.0, -359.0), (0.1, 0.0)] {
            let shifted = shift(&points, a, b).unwrap();
            let restored = shift(&shifted, -a, -b).unwrap();
            for (original, restored) in points.iter().zip(&restored) {
                assert_abs_diff_eq!(original, restored, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn shift_output_is_normalized() {
        for point in shift(&grid(), 45.0, 90.0).unwrap() {
            assert!((-90.0..90.0).contains(&point.lat()));
            assert!((-180.0..180.0).contains(&point.lon()));
        }
    }

    #[test]
    fn non_finite_input_fails_the_batch() {
        let points = [GeoPoint2d::latlon(0.0, 0.0), GeoPoint2d::latlon(f64::NAN, 0.0)];
        assert!(to_cartesian(&points, R).is_none());
        assert!(shift(&points, 45.0, 90.0).is_none());
    }
}
