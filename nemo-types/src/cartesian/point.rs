use crate::cartesian::traits::{CartesianPoint3d, NewCartesianPoint3d};
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// A point in 3-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates a new instance of the point by its coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns coordinates of the point as an array.
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl CartesianPoint3d for Point3 {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn z(&self) -> f64 {
        self.z
    }
}

impl NewCartesianPoint3d<f64> for Point3 {
    fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
}

impl AbsDiffEq for Point3 {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}
