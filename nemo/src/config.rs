//! Options of the pole of inaccessibility search.

use crate::candidates::Deduplication;
use crate::distance::DistanceModel;
use crate::error::{NemoError, Result};
use nemo_types::geo::Datum;
use serde::{Deserialize, Serialize};

/// Configuration of a [`PoleFinder`](crate::PoleFinder).
///
/// ```
/// use nemo::{DistanceModel, FinderOptions};
///
/// let options = FinderOptions::default()
///     .with_radius(6_371_000.0)
///     .with_distance_model(DistanceModel::GreatCircle);
/// assert_eq!(options.shift(), (45.0, 90.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinderOptions {
    radius: f64,
    lat_shift: f64,
    lon_shift: f64,
    distance_model: DistanceModel,
    deduplication: Deduplication,
    parallel: bool,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            radius: Datum::WGS84.semimajor(),
            lat_shift: 45.0,
            lon_shift: 90.0,
            distance_model: DistanceModel::default(),
            deduplication: Deduplication::default(),
            parallel: false,
        }
    }
}

impl FinderOptions {
    /// Sets radius of the sphere the Voronoi diagram is built on, in meters.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets latitude and longitude offsets (degrees) of the second Voronoi pass.
    pub fn with_shift(mut self, lat_shift: f64, lon_shift: f64) -> Self {
        self.lat_shift = lat_shift;
        self.lon_shift = lon_shift;
        self
    }

    /// Sets how distances from candidates to targets are measured.
    pub fn with_distance_model(mut self, distance_model: DistanceModel) -> Self {
        self.distance_model = distance_model;
        self
    }

    /// Sets how candidates of the two Voronoi passes are merged.
    pub fn with_deduplication(mut self, deduplication: Deduplication) -> Self {
        self.deduplication = deduplication;
        self
    }

    /// Measures candidates on all available cores. Requires the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sphere radius in meters.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Latitude and longitude offsets of the second pass.
    pub fn shift(&self) -> (f64, f64) {
        (self.lat_shift, self.lon_shift)
    }

    /// Distance model.
    pub fn distance_model(&self) -> DistanceModel {
        self.distance_model
    }

    /// Candidate deduplication mode.
    pub fn deduplication(&self) -> Deduplication {
        self.deduplication
    }

    /// Whether the search runs in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Checks that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(NemoError::Config(format!(
                "radius must be a positive number, got {}",
                self.radius
            )));
        }

        if !(self.lat_shift.is_finite() && self.lon_shift.is_finite()) {
            return Err(NemoError::Config("shift must be finite".to_string()));
        }

        if let Deduplication::Tolerance { meters } = self.deduplication {
            if !(meters.is_finite() && meters >= 0.0) {
                return Err(NemoError::Config(format!(
                    "deduplication tolerance must be a non-negative number, got {meters}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let options = FinderOptions::default();
        assert_eq!(options.radius(), 6_378_137.0);
        assert_eq!(options.shift(), (45.0, 90.0));
        assert_eq!(options.distance_model(), DistanceModel::Geodesic);
        assert_eq!(options.deduplication(), Deduplication::Exact);
        assert!(!options.parallel());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn invalid_values() {
        assert_matches!(
            FinderOptions::default().with_radius(-1.0).validate(),
            Err(NemoError::Config(_))
        );
        assert_matches!(
            FinderOptions::default()
                .with_shift(f64::NAN, 0.0)
                .validate(),
            Err(NemoError::Config(_))
        );
        assert_matches!(
            FinderOptions::default()
                .with_deduplication(Deduplication::Tolerance { meters: -3.0 })
                .validate(),
            Err(NemoError::Config(_))
        );
    }
}
