//! Distances between geographic points.

use crate::error::{NemoError, Result};
use geodesy::prelude::*;
use nemo_types::geo::impls::GeoPoint2d;
use nemo_types::geo::{Datum, GeoPoint};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Measures the distance along the surface between two geographic points.
pub trait DistanceMetric: Send + Sync {
    /// Distance between `a` and `b` in kilometers.
    fn distance_km(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> f64;
}

/// Model of the surface distances are measured on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceModel {
    /// Shortest path on the WGS84 ellipsoid.
    #[default]
    Geodesic,
    /// Great circle on the sphere the candidates are computed on.
    GreatCircle,
}

impl DistanceModel {
    /// Creates the metric for this model. `radius` is the sphere radius in meters, used by
    /// [`DistanceModel::GreatCircle`].
    pub fn metric(&self, radius: f64) -> Result<Box<dyn DistanceMetric>> {
        Ok(match self {
            DistanceModel::Geodesic => Box::new(GeodesicDistance::from_datum(&Datum::WGS84)?),
            DistanceModel::GreatCircle => Box::new(GreatCircleDistance::new(radius)),
        })
    }
}

/// Great circle distance on a sphere (haversine formula).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircleDistance {
    radius: f64,
}

impl GreatCircleDistance {
    /// Creates a metric for the sphere of the given radius in meters.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Central angle between two points in radians.
    pub fn central_angle(a: &GeoPoint2d, b: &GeoPoint2d) -> f64 {
        let d_lat = b.lat_rad() - a.lat_rad();
        let d_lon = b.lon_rad() - a.lon_rad();
        let h = (d_lat / 2.0).sin().powi(2)
            + a.lat_rad().cos() * b.lat_rad().cos() * (d_lon / 2.0).sin().powi(2);

        2.0 * h.sqrt().clamp(0.0, 1.0).asin()
    }
}

impl DistanceMetric for GreatCircleDistance {
    fn distance_km(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> f64 {
        Self::central_angle(a, b) * self.radius / 1000.0
    }
}

/// Geodesic distance on a reference ellipsoid.
///
/// Two points on the equator closer than `(1 - f) * PI` in longitude are connected by the equator
/// itself, and their distance is measured along it. For all other pairs the inverse geodesic
/// problem is solved with Vincenty's method. When that does not give a finite result, which
/// happens for nearly antipodal points, the great circle distance on the mean radius of the
/// ellipsoid is used.
#[derive(Debug, Clone)]
pub struct GeodesicDistance {
    ellipsoid: Ellipsoid,
    semimajor: f64,
    flattening: f64,
    fallback: GreatCircleDistance,
}

impl GeodesicDistance {
    /// Creates a metric for the ellipsoid of the given datum.
    pub fn from_datum(datum: &Datum) -> Result<Self> {
        if !(datum.semimajor() > 0.0 && datum.inv_flattening() > 1.0) {
            return Err(NemoError::Ellipsoid(format!("invalid datum {datum:?}")));
        }

        let flattening = 1.0 / datum.inv_flattening();
        Ok(Self {
            ellipsoid: Ellipsoid::new(datum.semimajor(), flattening),
            semimajor: datum.semimajor(),
            flattening,
            fallback: GreatCircleDistance::new(datum.mean_radius()),
        })
    }

    fn along_equator_m(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> Option<f64> {
        if a.lat() != 0.0 || b.lat() != 0.0 {
            return None;
        }

        let d_lon = (b.lon_rad() - a.lon_rad() + PI).rem_euclid(TAU) - PI;
        (d_lon.abs() <= (1.0 - self.flattening) * PI).then(|| self.semimajor * d_lon.abs())
    }
}

impl DistanceMetric for GeodesicDistance {
    fn distance_km(&self, a: &GeoPoint2d, b: &GeoPoint2d) -> f64 {
        if let Some(meters) = self.along_equator_m(a, b) {
            return meters / 1000.0;
        }

        let from = Coor4D::geo(a.lat(), a.lon(), 0.0, 0.0);
        let to = Coor4D::geo(b.lat(), b.lon(), 0.0, 0.0);
        let meters = self.ellipsoid.distance(&from, &to);

        if meters.is_finite() {
            meters / 1000.0
        } else {
            log::debug!("Geodesic between {a:?} and {b:?} did not converge, using great circle");
            self.fallback.distance_km(a, b)
        }
    }
}
