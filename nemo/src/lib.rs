//! Nemo finds the "pole of inaccessibility" of a set of points on a sphere: the place whose
//! distance to the nearest of the points is the largest. Given coastline points this is the
//! oceanic pole of inaccessibility, also known as Point Nemo.
//!
//! # Quick start
//!
//! ```
//! use nemo::{DistanceModel, FinderOptions, PoleFinder};
//! use nemo::nemo_types::latlon;
//!
//! let targets = vec![
//!     latlon!(0.0, 0.0),
//!     latlon!(0.0, 90.0),
//!     latlon!(0.0, 180.0),
//!     latlon!(0.0, -90.0),
//!     latlon!(90.0, 0.0),
//!     latlon!(-90.0, 0.0),
//! ];
//!
//! let options = FinderOptions::default().with_distance_model(DistanceModel::GreatCircle);
//! let solution = PoleFinder::new(options)?.find(&targets)?;
//! assert!((solution.remote.distance_km - 6093.0).abs() < 1.0);
//! # Ok::<(), nemo::NemoError>(())
//! ```
//!
//! # How it works
//!
//! Every local maximum of the distance to the nearest target is a vertex of the spherical Voronoi
//! diagram of the targets. The [`PoleFinder`] therefore
//!
//! * builds the diagram from the convex hull of the targets ([`voronoi`]),
//! * builds it a second time for the targets moved by a latitude/longitude shift and moves the
//!   vertices back, so that vertices distorted near the poles or the antimeridian in one frame are
//!   recovered from the other ([`candidates`]),
//! * measures every vertex against the targets, by default along the WGS84 ellipsoid, and returns
//!   the one whose nearest target is the farthest ([`search`]).
//!
//! The result is a heuristic: only Voronoi vertices of a perfect sphere are considered as
//! candidates.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod candidates;
mod config;
pub mod distance;
pub mod error;
mod finder;
mod hull;
pub mod input;
pub mod render;
pub mod search;
pub mod voronoi;

pub use candidates::{CandidateAggregator, CandidateSet, Deduplication};
pub use config::FinderOptions;
pub use distance::DistanceModel;
pub use error::NemoError;
pub use finder::{PoleFinder, Solution};
pub use search::RemotePoint;

// Reexport types crate
pub use nemo_types;
