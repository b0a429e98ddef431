//! The complete pipeline from targets to the most remote point.

use crate::candidates::{CandidateAggregator, CandidateSet};
use crate::config::FinderOptions;
use crate::distance::DistanceMetric;
use crate::error::{NemoError, Result};
use crate::search::{self, RemotePoint};
use nemo_types::geo::impls::GeoPoint2d;

/// Result of [`PoleFinder::find`].
#[derive(Debug, Clone)]
pub struct Solution {
    /// The most remote candidate.
    pub remote: RemotePoint,
    /// All candidates that were considered.
    pub candidates: CandidateSet,
}

/// Finds the point of the sphere farthest from its nearest target.
///
/// ```no_run
/// use nemo::{FinderOptions, PoleFinder};
///
/// let targets = nemo::input::read_targets_file("coastline.csv")?;
/// let solution = PoleFinder::new(FinderOptions::default())?.find(&targets)?;
/// println!("The most remote point is at {}", solution.remote);
/// # Ok::<(), nemo::NemoError>(())
/// ```
pub struct PoleFinder {
    options: FinderOptions,
    aggregator: CandidateAggregator,
    metric: Box<dyn DistanceMetric>,
}

impl PoleFinder {
    /// Creates a finder. Fails if the options are not valid.
    pub fn new(options: FinderOptions) -> Result<Self> {
        options.validate()?;

        if options.parallel() && !cfg!(feature = "parallel") {
            log::warn!("Parallel search requested but the `parallel` feature is disabled");
        }

        Ok(Self {
            aggregator: CandidateAggregator::new(&options),
            metric: options.distance_model().metric(options.radius())?,
            options,
        })
    }

    /// Collects candidates of the targets and returns the one farthest from its nearest target.
    pub fn find(&self, targets: &[GeoPoint2d]) -> Result<Solution> {
        if targets.is_empty() {
            return Err(NemoError::NoTargets);
        }

        log::info!("Computing Voronoi candidates for {} targets", targets.len());
        let candidates = self.aggregator.aggregate(targets)?;

        let remote = self.search(candidates.points(), targets)?;
        log::info!("The most remote point is at {remote}");

        Ok(Solution { remote, candidates })
    }

    /// Runs the maximin search with the configured metric.
    pub fn search(&self, candidates: &[GeoPoint2d], targets: &[GeoPoint2d]) -> Result<RemotePoint> {
        log::info!(
            "Measuring {} candidates against {} targets using {:?} distance",
            candidates.len(),
            targets.len(),
            self.options.distance_model()
        );

        #[cfg(feature = "parallel")]
        if self.options.parallel() {
            return search::find_most_remote_parallel(candidates, targets, self.metric.as_ref());
        }

        search::find_most_remote(candidates, targets, self.metric.as_ref())
    }
}

impl std::fmt::Debug for PoleFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoleFinder")
            .field("options", &self.options)
            .field("aggregator", &self.aggregator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceModel;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use nemo_types::geo::{GeoPoint, NewGeoPoint};

    const R: f64 = 6_378_137.0;

    fn axis_targets() -> Vec<GeoPoint2d> {
        vec![
            GeoPoint2d::latlon(0.0, 0.0),
            GeoPoint2d::latlon(0.0, 90.0),
            GeoPoint2d::latlon(0.0, 180.0),
            GeoPoint2d::latlon(0.0, -90.0),
            GeoPoint2d::latlon(90.0, 0.0),
            GeoPoint2d::latlon(-90.0, 0.0),
        ]
    }

    #[test]
    fn octant_center_is_most_remote() {
        let options = FinderOptions::default().with_distance_model(DistanceModel::GreatCircle);
        let solution = PoleFinder::new(options).unwrap().find(&axis_targets()).unwrap();

        let octant_lat = (1.0 / 2f64.sqrt()).atan().to_degrees();
        assert_abs_diff_eq!(solution.remote.point.lat().abs(), octant_lat, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.remote.point.lon().abs() % 90.0, 45.0, epsilon = 1e-9);

        let expected_km = (1.0 / 3f64.sqrt()).acos() * R / 1000.0;
        assert_abs_diff_eq!(solution.remote.distance_km, expected_km, epsilon = 1e-6);
        assert!(solution.candidates.len() >= 8);
    }

    #[test]
    fn empty_targets() {
        let finder = PoleFinder::new(FinderOptions::default()).unwrap();
        assert_matches!(finder.find(&[]), Err(NemoError::NoTargets));
    }

    #[test]
    fn too_few_targets() {
        let finder = PoleFinder::new(FinderOptions::default()).unwrap();
        assert_matches!(
            finder.find(&axis_targets()[..3]),
            Err(NemoError::Geometry(_))
        );
    }

    #[test]
    fn invalid_options() {
        assert_matches!(
            PoleFinder::new(FinderOptions::default().with_radius(0.0)),
            Err(NemoError::Config(_))
        );
    }

    #[test]
    fn debug_shows_options() {
        let finder = PoleFinder::new(FinderOptions::default().with_radius(1000.0)).unwrap();
        let printed = format!("{finder:?}");
        assert!(printed.starts_with("PoleFinder"));
        assert!(printed.contains("1000.0"));
    }

    #[test]
    fn search_without_candidates() {
        let finder = PoleFinder::new(FinderOptions::default()).unwrap();
        assert_matches!(
            finder.search(&[], &axis_targets()),
            Err(NemoError::NoCandidates)
        );
    }
}
