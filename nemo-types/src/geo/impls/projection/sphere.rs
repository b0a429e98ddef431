use crate::cartesian::NewCartesianPoint3d;
use crate::geo::datum::Datum;
use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use std::marker::PhantomData;

/// Projects geographic coordinates onto the surface of a sphere centered at the origin of a 3d
/// cartesian space.
///
/// The z axis goes through the north pole, the x axis through the intersection of the equator and
/// the prime meridian. Unprojecting only uses the direction of the cartesian point, so points
/// that are not exactly on the sphere are mapped to the point of the surface right below (or
/// above) them.
#[derive(Debug, Copy, Clone)]
pub struct SphereProjection<In, Out> {
    radius: f64,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> SphereProjection<In, Out> {
    /// Creates a projection onto the sphere with the given radius in meters.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl<In, Out> Default for SphereProjection<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84.semimajor())
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint3d<f64>> Projection for SphereProjection<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let phi = input.lat_rad();
        let theta = input.lon_rad();

        let x = self.radius * phi.cos() * theta.cos();
        let y = self.radius * phi.cos() * theta.sin();
        let z = self.radius * phi.sin();

        if x.is_finite() && y.is_finite() && z.is_finite() {
            Some(Out::new(x, y, z))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        if !input.is_finite() {
            return None;
        }

        let (x, y, z) = (input.x(), input.y(), input.z());
        let phi = z.atan2((x * x + y * y).sqrt());
        let theta = y.atan2(x);

        Some(In::latlon(phi.to_degrees(), theta.to_degrees()))
    }
}
