//! Candidate points for the most remote point, collected from two Voronoi passes.
//!
//! A single Voronoi pass can distort or miss vertices close to the poles and the antimeridian. The
//! [`CandidateAggregator`] runs a second pass over targets reparameterized with a
//! [`ShiftProjection`](nemo_types::geo::impls::projection::ShiftProjection), maps its vertices back
//! and keeps the union of both passes.

use crate::config::FinderOptions;
use crate::error::{NemoError, Result};
use crate::voronoi::{HullVoronoiEngine, VoronoiEngine};
use nemo_types::cartesian::{CartesianPoint3d, Point3};
use nemo_types::geo::impls::projection::SphereProjection;
use nemo_types::geo::impls::GeoPoint2d;
use nemo_types::geo::transform::{shift, to_cartesian, to_geographic};
use nemo_types::geo::{GeoPoint, Projection};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How candidates that describe the same place are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Deduplication {
    /// Only candidates with exactly equal coordinates are merged. Candidates of the two passes
    /// differing by floating point noise are all kept.
    #[default]
    Exact,
    /// A candidate closer than `meters` (along the sphere) to an earlier one is dropped.
    Tolerance {
        /// Merge distance in meters.
        meters: f64,
    },
}

/// Ordered set of candidate points.
///
/// Iteration follows insertion order, which makes the tie-breaking of the search deterministic.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    points: Vec<GeoPoint2d>,
    index: CandidateIndex,
}

#[derive(Debug, Clone)]
enum CandidateIndex {
    Exact(HashSet<[u64; 2]>),
    Tolerance(ProximityGrid),
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::new(Deduplication::Exact, 1.0)
    }
}

impl CandidateSet {
    /// Creates an empty set. `radius` of the sphere is only used with
    /// [`Deduplication::Tolerance`].
    pub fn new(deduplication: Deduplication, radius: f64) -> Self {
        let index = match deduplication {
            Deduplication::Exact => CandidateIndex::Exact(HashSet::new()),
            Deduplication::Tolerance { meters } => {
                CandidateIndex::Tolerance(ProximityGrid::new(meters, radius))
            }
        };

        Self {
            points: vec![],
            index,
        }
    }

    /// Adds the point unless an equal one is already in the set. Returns true if the point was
    /// added.
    pub fn insert(&mut self, point: GeoPoint2d) -> bool {
        let is_new = match &mut self.index {
            CandidateIndex::Exact(keys) => keys.insert(exact_key(&point)),
            CandidateIndex::Tolerance(grid) => grid.insert(&point),
        };

        if is_new {
            self.points.push(point);
        }

        is_new
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set has no candidates.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Candidates in insertion order.
    pub fn points(&self) -> &[GeoPoint2d] {
        &self.points
    }

    /// Iterates over candidates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint2d> {
        self.points.iter()
    }
}

impl Extend<GeoPoint2d> for CandidateSet {
    fn extend<T: IntoIterator<Item = GeoPoint2d>>(&mut self, iter: T) {
        for point in iter {
            self.insert(point);
        }
    }
}

/// Bit patterns of the coordinates. Adding `0.0` folds `-0.0` into `0.0`.
fn exact_key(point: &GeoPoint2d) -> [u64; 2] {
    [(point.lat() + 0.0).to_bits(), (point.lon() + 0.0).to_bits()]
}

/// Hash grid over cartesian positions for finding earlier points within a distance.
#[derive(Debug, Clone)]
struct ProximityGrid {
    projection: SphereProjection<GeoPoint2d, Point3>,
    max_chord: f64,
    cell: f64,
    cells: HashMap<[i64; 3], Vec<Point3>>,
}

impl ProximityGrid {
    fn new(meters: f64, radius: f64) -> Self {
        let angle = (meters / radius).min(std::f64::consts::PI);
        let max_chord = 2.0 * radius * (angle / 2.0).sin();

        Self {
            projection: SphereProjection::new(radius),
            max_chord,
            cell: max_chord.max(1e-3),
            cells: HashMap::new(),
        }
    }

    fn insert(&mut self, point: &GeoPoint2d) -> bool {
        let Some(position) = self.projection.project(point) else {
            return false;
        };

        let key = position.coords().map(|c| (c / self.cell).floor() as i64);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbour = [key[0] + dx, key[1] + dy, key[2] + dz];
                    let Some(points) = self.cells.get(&neighbour) else {
                        continue;
                    };
                    if points.iter().any(|p| chord(p, &position) <= self.max_chord) {
                        return false;
                    }
                }
            }
        }

        self.cells.entry(key).or_default().push(position);
        true
    }
}

fn chord(a: &Point3, b: &Point3) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    let dz = a.z() - b.z();
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Collects Voronoi vertices of the targets from a direct and a shifted pass.
#[derive(Debug, Clone)]
pub struct CandidateAggregator<E = HullVoronoiEngine> {
    engine: E,
    radius: f64,
    lat_shift: f64,
    lon_shift: f64,
    deduplication: Deduplication,
}

impl CandidateAggregator {
    /// Creates an aggregator using the convex hull Voronoi engine.
    pub fn new(options: &FinderOptions) -> Self {
        Self::with_engine(HullVoronoiEngine, options)
    }
}

impl<E: VoronoiEngine> CandidateAggregator<E> {
    /// Creates an aggregator using the given Voronoi engine.
    pub fn with_engine(engine: E, options: &FinderOptions) -> Self {
        let (lat_shift, lon_shift) = options.shift();
        Self {
            engine,
            radius: options.radius(),
            lat_shift,
            lon_shift,
            deduplication: options.deduplication(),
        }
    }

    /// Returns the union of the Voronoi vertices of `targets` and of the shifted `targets`, the
    /// latter mapped back with the inverse shift. Vertices of the direct pass come first.
    ///
    /// A [`NemoError::Geometry`] of either pass is returned as is; a pass without usable vertices
    /// contributes nothing.
    pub fn aggregate(&self, targets: &[GeoPoint2d]) -> Result<CandidateSet> {
        let direct = self.voronoi_pass(targets, "direct")?;

        let shifted_targets = shift(targets, self.lat_shift, self.lon_shift).ok_or_else(|| {
            NemoError::Geometry("target coordinates are not finite".to_string())
        })?;
        let shifted = self.voronoi_pass(&shifted_targets, "shifted")?;
        let restored = shift(&shifted, -self.lat_shift, -self.lon_shift).unwrap_or_default();

        let mut candidates = CandidateSet::new(self.deduplication, self.radius);
        candidates.extend(direct.iter().copied());
        candidates.extend(restored.iter().copied());

        log::info!(
            "Collected {} candidates ({} direct, {} shifted) for {} targets",
            candidates.len(),
            direct.len(),
            restored.len(),
            targets.len()
        );

        Ok(candidates)
    }

    fn voronoi_pass(&self, targets: &[GeoPoint2d], name: &str) -> Result<Vec<GeoPoint2d>> {
        let generators = to_cartesian(targets, self.radius).ok_or_else(|| {
            NemoError::Geometry("target coordinates are not finite".to_string())
        })?;

        let mut vertices = self.engine.vertices(&generators, self.radius)?;
        let total = vertices.len();
        vertices.retain(|v| v.is_finite());

        let candidates = to_geographic(&vertices, self.radius).unwrap_or_default();
        if candidates.is_empty() {
            log::warn!("The {name} Voronoi pass produced no usable vertices out of {total}");
        } else {
            log::debug!(
                "The {name} Voronoi pass produced {} vertices ({} non-finite dropped)",
                candidates.len(),
                total - vertices.len()
            );
        }

        Ok(candidates)
    }
}
