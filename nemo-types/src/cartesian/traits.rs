use num_traits::Float;

/// Point in 3-dimensional cartesian coordinate space.
pub trait CartesianPoint3d {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;
    /// Z coordinate.
    fn z(&self) -> Self::Num;

    /// Squared distance from the origin.
    fn magnitude_sq(&self) -> Self::Num {
        self.x() * self.x() + self.y() * self.y() + self.z() * self.z()
    }

    /// Distance from the origin.
    fn magnitude(&self) -> Self::Num {
        self.magnitude_sq().sqrt()
    }

    /// Returns true if all three coordinates are finite numbers.
    fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite() && self.z().is_finite()
    }
}

/// 3d cartesian point that can be constructed from its coordinates.
pub trait NewCartesianPoint3d<Num = f64>: CartesianPoint3d<Num = Num> {
    /// Creates a new point.
    fn new(x: Num, y: Num, z: Num) -> Self;
}
