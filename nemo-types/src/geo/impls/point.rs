use crate::error::NemoTypesError;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use serde::{Deserialize, Serialize};

/// 2d point on the surface of a celestial body.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a point checking that latitude is in `[-90, 90]` and longitude is in `[-180, 180]`.
    pub fn try_latlon(lat: f64, lon: f64) -> Result<Self, NemoTypesError> {
        check_range("latitude", lat, 90.0)?;
        check_range("longitude", lon, 180.0)?;

        Ok(Self { lat, lon })
    }
}

fn check_range(name: &'static str, value: f64, limit: f64) -> Result<(), NemoTypesError> {
    if !value.is_finite() {
        return Err(NemoTypesError::NotFinite(name));
    }

    if !(-limit..=limit).contains(&value) {
        return Err(NemoTypesError::OutOfRange {
            name,
            value,
            min: -limit,
            max: limit,
        });
    }

    Ok(())
}

impl approx::AbsDiffEq for GeoPoint2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use nemo_types::geo::GeoPoint;
/// use nemo_types::latlon;
///
/// let point = latlon!(-48.88, -123.39);
/// assert_eq!(point.lat(), -48.88);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <::nemo_types::geo::impls::GeoPoint2d as ::nemo_types::geo::NewGeoPoint<f64>>::latlon(
            $lat, $lon,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn try_latlon_accepts_bounds() {
        assert!(GeoPoint2d::try_latlon(90.0, 180.0).is_ok());
        assert!(GeoPoint2d::try_latlon(-90.0, -180.0).is_ok());
    }

    #[test]
    fn try_latlon_rejects_out_of_range() {
        assert_matches!(
            GeoPoint2d::try_latlon(90.5, 0.0),
            Err(NemoTypesError::OutOfRange {
                name: "latitude",
                ..
            })
        );
        assert_matches!(
            GeoPoint2d::try_latlon(0.0, -181.0),
            Err(NemoTypesError::OutOfRange {
                name: "longitude",
                ..
            })
        );
        assert_matches!(
            GeoPoint2d::try_latlon(f64::NAN, 0.0),
            Err(NemoTypesError::NotFinite("latitude"))
        );
    }

    #[test]
    fn lonlat_swaps_arguments() {
        let point = GeoPoint2d::lonlat(10.0, 20.0);
        assert_eq!(point.lat(), 20.0);
        assert_eq!(point.lon(), 10.0);
    }
}
