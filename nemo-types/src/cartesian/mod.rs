//! Types and functions on points in 3d cartesian coordinates.

mod point;
mod traits;

pub use point::Point3;
pub use traits::{CartesianPoint3d, NewCartesianPoint3d};
