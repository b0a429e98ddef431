use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use std::marker::PhantomData;

/// Reparameterization of geographic coordinates that adds a wrapping offset to latitude and
/// longitude independently.
///
/// This is not a rotation of the sphere: a latitude pushed past a pole reappears at the opposite
/// pole. Its only purpose is to move coordinate singularities (poles and the antimeridian) to a
/// different place. [`Projection::unproject`] applies the negated offsets and is the exact inverse
/// of [`Projection::project`] for latitudes in `[-90, 90)` and longitudes in `[-180, 180)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShiftProjection<P> {
    lat_shift: f64,
    lon_shift: f64,
    phantom: PhantomData<P>,
}

impl<P> ShiftProjection<P> {
    /// Creates a new shift by the given offsets in degrees.
    pub fn new(lat_shift: f64, lon_shift: f64) -> Self {
        Self {
            lat_shift,
            lon_shift,
            phantom: Default::default(),
        }
    }

    /// Latitude offset in degrees.
    pub fn lat_shift(&self) -> f64 {
        self.lat_shift
    }

    /// Longitude offset in degrees.
    pub fn lon_shift(&self) -> f64 {
        self.lon_shift
    }

    /// Shift with both offsets negated.
    pub fn inverse(&self) -> Self {
        Self::new(-self.lat_shift, -self.lon_shift)
    }
}

impl<P: NewGeoPoint<f64>> ShiftProjection<P> {
    fn apply(input: &P, lat_shift: f64, lon_shift: f64) -> Option<P> {
        let lat = wrap(input.lat() + 90.0 + lat_shift, 180.0) - 90.0;
        let lon = wrap(input.lon() + 180.0 + lon_shift, 360.0) - 180.0;

        if lat.is_finite() && lon.is_finite() {
            Some(P::latlon(lat, lon))
        } else {
            None
        }
    }
}

impl<P: NewGeoPoint<f64>> Projection for ShiftProjection<P> {
    type InPoint = P;
    type OutPoint = P;

    fn project(&self, input: &P) -> Option<P> {
        Self::apply(input, self.lat_shift, self.lon_shift)
    }

    fn unproject(&self, input: &P) -> Option<P> {
        Self::apply(input, -self.lat_shift, -self.lon_shift)
    }
}

/// Euclidean remainder in `[0, span)`.
///
/// `rem_euclid` rounds to `span` itself for tiny negative values, which would put a point outside
/// of the coordinate range.
fn wrap(value: f64, span: f64) -> f64 {
    let r = value.rem_euclid(span);
    if r >= span {
        r - span
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::impls::GeoPoint2d;
    use approx::assert_abs_diff_eq;

    #[test]
    fn shift_wraps_latitude_over_the_pole() {
        let shift = ShiftProjection::new(45.0, 90.0);
        let shifted = shift.project(&GeoPoint2d::latlon(60.0, 120.0)).unwrap();
        assert_abs_diff_eq!(shifted, GeoPoint2d::latlon(-75.0, -150.0), epsilon = 1e-12);
    }

    #[test]
    fn unproject_is_inverse() {
        let shift = ShiftProjection::new(45.0, 90.0);
        for lat in (-90..90).step_by(5) {
            for lon in (-180..180).step_by(5) {
                let point = GeoPoint2d::latlon(lat as f64 + 0.3, lon as f64 + 0.7);
                let shifted = shift.project(&point).unwrap();
                let restored = shift.unproject(&shifted).unwrap();
                assert_abs_diff_eq!(restored, point, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn inverse_negates_offsets() {
        let shift = ShiftProjection::<GeoPoint2d>::new(45.0, -90.0);
        let inverse = shift.inverse();
        assert_eq!(inverse.lat_shift(), -45.0);
        assert_eq!(inverse.lon_shift(), 90.0);
    }

    #[test]
    fn wrap_stays_in_range() {
        assert_eq!(wrap(-1e-20, 180.0), 0.0);
        assert_eq!(wrap(180.0, 180.0), 0.0);
        assert_eq!(wrap(-10.0, 360.0), 350.0);
    }
}
