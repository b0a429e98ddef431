/// Conversion of points from one coordinate space into another.
///
/// Both directions return `None` if the conversion is not defined for the given point or
/// produces non-finite coordinates.
pub trait Projection {
    /// Type of the input point.
    type InPoint;
    /// Type of the output point.
    type OutPoint;

    /// Converts an input point into the output space.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Converts a point from the output space back into the input space.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
