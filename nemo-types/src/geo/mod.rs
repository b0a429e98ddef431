//! Geometries in geographic coordinates (latitude and longitude) (see [`GeoPoint`]) and conversion
//! between geographic coordinates and other coordinate spaces (see [`Projection`]).

mod datum;
pub mod impls;
mod traits;
pub mod transform;

pub use datum::Datum;
pub use traits::point::{GeoPoint, NewGeoPoint};
pub use traits::projection::Projection;
