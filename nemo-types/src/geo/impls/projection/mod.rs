//! Projections between geographic coordinates and other coordinate spaces.
mod shift;
mod sphere;

pub use shift::ShiftProjection;
pub use sphere::SphereProjection;
