//! Maximin search: the candidate farthest from its nearest target.

use crate::distance::DistanceMetric;
use crate::error::{NemoError, Result};
use nemo_types::geo::impls::GeoPoint2d;
use nemo_types::geo::GeoPoint;
use std::fmt::{Display, Formatter};

/// Winner of the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemotePoint {
    /// The candidate with the largest distance to its nearest target.
    pub point: GeoPoint2d,
    /// Distance from `point` to the nearest target in kilometers.
    pub distance_km: f64,
}

impl Display for RemotePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.6}, {:.6}) that is {:.3} kilometers away from the nearest point",
            self.point.lat(),
            self.point.lon(),
            self.distance_km
        )
    }
}

fn check_input(candidates: &[GeoPoint2d], targets: &[GeoPoint2d]) -> Result<()> {
    if candidates.is_empty() {
        return Err(NemoError::NoCandidates);
    }
    if targets.is_empty() {
        return Err(NemoError::NoTargets);
    }

    Ok(())
}

/// Finds the candidate whose distance to the nearest target is the largest.
///
/// Candidates are scanned in order. Measuring a candidate stops as soon as its distance to some
/// target is below the best value found so far, since such a candidate cannot win anymore. On a
/// tie the earlier candidate wins. The result is identical to [`find_most_remote_exhaustive`].
///
/// Fails with [`NemoError::NoCandidates`] or [`NemoError::NoTargets`] if either list is empty.
pub fn find_most_remote<M: DistanceMetric + ?Sized>(
    candidates: &[GeoPoint2d],
    targets: &[GeoPoint2d],
    metric: &M,
) -> Result<RemotePoint> {
    check_input(candidates, targets)?;

    let mut best: Option<RemotePoint> = None;
    for candidate in candidates {
        let mut nearest = f64::INFINITY;
        for target in targets {
            nearest = nearest.min(metric.distance_km(candidate, target));
            if best.is_some_and(|b| nearest < b.distance_km) {
                break;
            }
        }

        if best.map_or(true, |b| nearest > b.distance_km) {
            best = Some(RemotePoint {
                point: *candidate,
                distance_km: nearest,
            });
        }
    }

    best.ok_or(NemoError::NoCandidates)
}

/// Same as [`find_most_remote`] but measures every candidate against every target.
pub fn find_most_remote_exhaustive<M: DistanceMetric + ?Sized>(
    candidates: &[GeoPoint2d],
    targets: &[GeoPoint2d],
    metric: &M,
) -> Result<RemotePoint> {
    check_input(candidates, targets)?;

    candidates
        .iter()
        .map(|candidate| RemotePoint {
            point: *candidate,
            distance_km: nearest_target_km(candidate, targets, metric),
        })
        .reduce(|best, next| {
            if next.distance_km > best.distance_km {
                next
            } else {
                best
            }
        })
        .ok_or(NemoError::NoCandidates)
}

/// Same as [`find_most_remote_exhaustive`] but measures candidates on the rayon thread pool.
///
/// Results are reduced in candidate order, so ties resolve the same way as in the sequential
/// search.
#[cfg(feature = "parallel")]
pub fn find_most_remote_parallel<M: DistanceMetric + ?Sized>(
    candidates: &[GeoPoint2d],
    targets: &[GeoPoint2d],
    metric: &M,
) -> Result<RemotePoint> {
    use rayon::prelude::*;

    check_input(candidates, targets)?;

    candidates
        .par_iter()
        .map(|candidate| RemotePoint {
            point: *candidate,
            distance_km: nearest_target_km(candidate, targets, metric),
        })
        .reduce_with(|best, next| {
            if next.distance_km > best.distance_km {
                next
            } else {
                best
            }
        })
        .ok_or(NemoError::NoCandidates)
}

fn nearest_target_km<M: DistanceMetric + ?Sized>(
    candidate: &GeoPoint2d,
    targets: &[GeoPoint2d],
    metric: &M,
) -> f64 {
    targets
        .iter()
        .map(|target| metric.distance_km(candidate, target))
        .fold(f64::INFINITY, f64::min)
}
