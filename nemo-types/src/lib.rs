//! Point types and coordinate transforms used by the `nemo` pole of inaccessibility search.
//!
//! Geographic points (latitude and longitude in degrees) live in the [`geo`] module together with
//! the [`Projection`](geo::Projection) trait and the sphere and shift projections. Points in 3d
//! cartesian space are in the [`cartesian`] module.

pub mod cartesian;
pub mod error;
pub mod geo;
