//! Spherical Voronoi diagram of points on a sphere centered at the origin.
//!
//! The diagram is dual to the convex hull of its generators: every hull facet gives one Voronoi
//! vertex at the circumcenter of the facet triangle, projected radially onto the sphere. Such a
//! vertex is equidistant from the three generators of the facet and farther from all others, so
//! every local maximum of the distance to the nearest generator is one of the vertices.

use crate::error::{NemoError, Result};
use crate::hull::{ConvexHull, HULL_EPSILON};
use nalgebra::Vector3;
use nemo_types::cartesian::{CartesianPoint3d, Point3};

/// Relative deviation from the sphere radius tolerated for generator points.
const SPHERE_TOLERANCE: f64 = 1e-9;

/// Produces Voronoi vertices for points on a sphere.
pub trait VoronoiEngine {
    /// Returns vertices of the spherical Voronoi diagram of `points` lying on the sphere of the
    /// given `radius`. Vertices that cannot be computed reliably are left out.
    fn vertices(&self, points: &[Point3], radius: f64) -> Result<Vec<Point3>>;
}

/// Default [`VoronoiEngine`] building a [`SphericalVoronoi`] through a convex hull.
#[derive(Debug, Default, Clone, Copy)]
pub struct HullVoronoiEngine;

impl VoronoiEngine for HullVoronoiEngine {
    fn vertices(&self, points: &[Point3], radius: f64) -> Result<Vec<Point3>> {
        Ok(SphericalVoronoi::new(points, radius)?.into_vertices())
    }
}

/// Vertices of a spherical Voronoi diagram.
#[derive(Debug, Clone)]
pub struct SphericalVoronoi {
    vertices: Vec<Point3>,
    dropped: usize,
}

impl SphericalVoronoi {
    /// Computes the diagram of the given generators.
    ///
    /// Fails with [`NemoError::Geometry`] if the radius is not positive, a generator is not on the
    /// sphere, there are less than 4 distinct generators or all of them lie in one plane.
    pub fn new(generators: &[Point3], radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(NemoError::Geometry(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }

        let mut directions = Vec::with_capacity(generators.len());
        for (index, point) in generators.iter().enumerate() {
            let magnitude = point.magnitude();
            if !magnitude.is_finite() || (magnitude - radius).abs() > SPHERE_TOLERANCE * radius {
                return Err(NemoError::Geometry(format!(
                    "generator {index} ({point:?}) is not on the sphere of radius {radius}"
                )));
            }
            directions.push(Vector3::from(point.coords()) / magnitude);
        }

        let hull = ConvexHull::new(directions)?;

        let mut vertices = Vec::with_capacity(hull.facets().len());
        let mut dropped = 0;
        for triangle in hull.iter_triangles() {
            match project_circumcenter(triangle, radius) {
                Some(vertex) => vertices.push(vertex),
                None => dropped += 1,
            }
        }

        log::debug!(
            "Voronoi diagram of {} generators: {} vertices, {dropped} dropped",
            generators.len(),
            vertices.len()
        );

        Ok(Self { vertices, dropped })
    }

    /// Voronoi vertices, one per hull facet, in facet order.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Consumes the diagram returning its vertices.
    pub fn into_vertices(self) -> Vec<Point3> {
        self.vertices
    }

    /// Number of facets whose circumcenter could not be projected onto the sphere.
    pub fn dropped_vertices(&self) -> usize {
        self.dropped
    }
}

/// Circumcenter of the triangle moved along its ray from the origin onto the sphere.
///
/// The vertex is taken on the outer side of the facet. If the facet plane goes through the center
/// of the sphere, the facet normal gives the direction. Returns `None` for a triangle without an
/// area or a non-finite result.
fn project_circumcenter([a, b, c]: [Vector3<f64>; 3], radius: f64) -> Option<Point3> {
    let u = b - a;
    let v = c - a;
    let w = u.cross(&v);

    let center = a
        + (w.cross(&u) * v.norm_squared() + v.cross(&w) * u.norm_squared())
            / (2.0 * w.norm_squared());
    if !center.iter().all(|x| x.is_finite()) {
        return None;
    }

    let mut direction = if center.norm() < HULL_EPSILON { w } else { center };
    if direction.dot(&w) < 0.0 {
        direction = -direction;
    }

    let length = direction.norm();
    if !(length.is_finite() && length > 0.0) {
        return None;
    }

    let vertex = direction * (radius / length);
    let point = Point3::new(vertex.x, vertex.y, vertex.z);
    point.is_finite().then_some(point)
}
