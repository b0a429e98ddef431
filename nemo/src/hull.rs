//! 3d convex hull of a point set (quickhull).
//!
//! The hull is built incrementally: an initial tetrahedron is made of extreme points, every other
//! point is assigned to a facet it lies above, and facets with assigned points are repeatedly
//! replaced by a cone from their farthest point to the horizon of the region visible from it.
//!
//! Facets are triangles oriented counter-clockwise when seen from outside of the hull. Coplanar
//! neighbouring facets are not merged.
//!
//! Whether a point is above a facet is decided with an exact orientation predicate, so closely
//! spaced points are never mistaken for interior ones.

use nalgebra::Vector3;
use robust::Coord3D;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Extent below which the whole point set is considered to lie on a plane or a line.
///
/// Intended for point sets normalized to the unit sphere.
pub const HULL_EPSILON: f64 = 1e-12;

/// Reasons a hull cannot be constructed.
#[derive(Debug, Error, PartialEq)]
pub enum HullError {
    /// Less than 4 distinct points given.
    #[error("at least 4 distinct points are required, got {0}")]
    InsufficientPoints(usize),
    /// All points lie on a single plane (or a line, or coincide).
    #[error("all points are {0}")]
    Degenerate(&'static str),
}

/// Convex hull of a set of points in 3d space.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    points: Vec<Vector3<f64>>,
    facets: Vec<[usize; 3]>,
}

impl ConvexHull {
    /// Computes the hull of the given points.
    pub fn new(points: Vec<Vector3<f64>>) -> Result<Self, HullError> {
        let distinct = points
            .iter()
            .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
            .collect::<HashSet<_>>()
            .len();
        if distinct < 4 {
            return Err(HullError::InsufficientPoints(distinct));
        }

        let facets = Builder::new(&points)?.build();
        Ok(Self { points, facets })
    }

    /// Points the hull was built from.
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Triangular facets of the hull as indices into [`ConvexHull::points`].
    pub fn facets(&self) -> &[[usize; 3]] {
        &self.facets
    }

    /// Iterates over facets as triples of points.
    pub fn iter_triangles(&self) -> impl Iterator<Item = [Vector3<f64>; 3]> + '_ {
        self.facets
            .iter()
            .map(|f| [self.points[f[0]], self.points[f[1]], self.points[f[2]]])
    }
}

#[derive(Debug)]
struct Face {
    vertices: [usize; 3],
    normal: Vector3<f64>,
    offset: f64,
    outside: Vec<usize>,
    alive: bool,
}

impl Face {
    fn new(points: &[Vector3<f64>], vertices: [usize; 3]) -> Self {
        let [a, b, c] = vertices.map(|i| points[i]);
        let normal = (b - a).cross(&(c - a));
        let length = normal.norm();
        let normal = if length > 0.0 { normal / length } else { normal };

        Self {
            vertices,
            normal,
            offset: normal.dot(&a),
            outside: vec![],
            alive: true,
        }
    }

    fn distance(&self, point: &Vector3<f64>) -> f64 {
        self.normal.dot(point) - self.offset
    }

    /// Exact test that the point lies strictly above the facet plane, on its outer side.
    fn is_above(&self, points: &[Vector3<f64>], point: &Vector3<f64>) -> bool {
        let [a, b, c] = self.vertices.map(|i| coord(&points[i]));
        robust::orient3d(a, b, c, coord(point)) < 0.0
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

struct Builder<'a> {
    points: &'a [Vector3<f64>],
    faces: Vec<Face>,
    edges: HashMap<(usize, usize), usize>,
}

impl<'a> Builder<'a> {
    fn new(points: &'a [Vector3<f64>]) -> Result<Self, HullError> {
        let simplex = initial_simplex(points)?;
        let centroid = simplex.iter().map(|&i| points[i]).sum::<Vector3<f64>>() / 4.0;

        let mut builder = Self {
            points,
            faces: vec![],
            edges: HashMap::new(),
        };

        let [i0, i1, i2, i3] = simplex;
        for [a, b, c] in [[i0, i1, i2], [i0, i1, i3], [i0, i2, i3], [i1, i2, i3]] {
            let face = Face::new(points, [a, b, c]);
            let vertices = if face.is_above(points, &centroid) {
                [a, c, b]
            } else {
                [a, b, c]
            };
            builder.add_face(vertices);
        }

        let initial = (0..builder.faces.len()).collect::<Vec<_>>();
        let rest = (0..points.len()).filter(|i| !simplex.contains(i)).collect();
        builder.assign(rest, &initial);

        Ok(builder)
    }

    fn add_face(&mut self, vertices: [usize; 3]) -> usize {
        let face = Face::new(self.points, vertices);
        let index = self.faces.len();
        for edge in face.edges() {
            self.edges.insert(edge, index);
        }
        self.faces.push(face);
        index
    }

    /// Gives every point to the first face it is above. Points above no face are inside the hull.
    fn assign(&mut self, points: Vec<usize>, faces: &[usize]) {
        let all_points = self.points;
        for p in points {
            let point = &all_points[p];
            if let Some(&face) = faces
                .iter()
                .find(|&&f| self.faces[f].is_above(all_points, point))
            {
                self.faces[face].outside.push(p);
            }
        }
    }

    fn farthest_outside(&self, face: &Face) -> Option<usize> {
        face.outside.iter().copied().max_by(|&a, &b| {
            face.distance(&self.points[a])
                .total_cmp(&face.distance(&self.points[b]))
        })
    }

    fn build(mut self) -> Vec<[usize; 3]> {
        let mut pending = (0..self.faces.len())
            .filter(|&f| !self.faces[f].outside.is_empty())
            .collect::<Vec<_>>();

        while let Some(start) = pending.pop() {
            if !self.faces[start].alive {
                continue;
            }
            let Some(apex) = self.farthest_outside(&self.faces[start]) else {
                continue;
            };

            let (visible, horizon) = self.visible_region(start, apex);

            let mut orphans = vec![];
            for &f in &visible {
                let face = &mut self.faces[f];
                face.alive = false;
                orphans.append(&mut face.outside);
                for edge in face.edges() {
                    self.edges.remove(&edge);
                }
            }
            orphans.retain(|&p| p != apex);

            let cone = horizon
                .into_iter()
                .map(|(a, b)| self.add_face([a, b, apex]))
                .collect::<Vec<_>>();
            self.assign(orphans, &cone);

            pending.extend(
                cone.into_iter()
                    .filter(|&f| !self.faces[f].outside.is_empty()),
            );
        }

        self.faces
            .into_iter()
            .filter(|f| f.alive)
            .map(|f| f.vertices)
            .collect()
    }

    /// Returns faces that can be seen from the `apex` point and the directed edges that separate
    /// them from the rest of the hull.
    fn visible_region(&self, start: usize, apex: usize) -> (Vec<usize>, Vec<(usize, usize)>) {
        let apex_point = &self.points[apex];
        let mut is_visible = HashMap::from([(start, true)]);
        let mut visible = vec![start];
        let mut horizon = vec![];
        let mut stack = vec![start];

        while let Some(f) = stack.pop() {
            for (a, b) in self.faces[f].edges() {
                let Some(&neighbour) = self.edges.get(&(b, a)) else {
                    continue;
                };

                let neighbour_visible = *is_visible.entry(neighbour).or_insert_with(|| {
                    let seen = self.faces[neighbour].is_above(self.points, apex_point);
                    if seen {
                        visible.push(neighbour);
                        stack.push(neighbour);
                    }
                    seen
                });

                if !neighbour_visible {
                    horizon.push((a, b));
                }
            }
        }

        (visible, horizon)
    }
}

fn coord(point: &Vector3<f64>) -> Coord3D<f64> {
    Coord3D {
        x: point.x,
        y: point.y,
        z: point.z,
    }
}

fn initial_simplex(points: &[Vector3<f64>]) -> Result<[usize; 4], HullError> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[2 * axis]][axis] {
                extremes[2 * axis] = i;
            }
            if p[axis] > points[extremes[2 * axis + 1]][axis] {
                extremes[2 * axis + 1] = i;
            }
        }
    }

    let mut best = (0.0, extremes[0], extremes[1]);
    for &a in &extremes {
        for &b in &extremes {
            let d = (points[a] - points[b]).norm_squared();
            if d > best.0 {
                best = (d, a, b);
            }
        }
    }
    let (spread, i0, i1) = best;
    if spread.sqrt() < HULL_EPSILON {
        return Err(HullError::Degenerate("coincident"));
    }

    let direction = (points[i1] - points[i0]).normalize();
    let (line_distance, i2) = farthest(points, |p| (p - points[i0]).cross(&direction).norm());
    if line_distance < HULL_EPSILON {
        return Err(HullError::Degenerate("collinear"));
    }

    let base = Face::new(points, [i0, i1, i2]);
    let (plane_distance, i3) = farthest(points, |p| base.distance(p).abs());
    if plane_distance < HULL_EPSILON {
        return Err(HullError::Degenerate("coplanar"));
    }

    Ok([i0, i1, i2, i3])
}

fn farthest(points: &[Vector3<f64>], metric: impl Fn(&Vector3<f64>) -> f64) -> (f64, usize) {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (metric(p), i))
        .fold((f64::NEG_INFINITY, 0), |acc, item| {
            if item.0 > acc.0 {
                item
            } else {
                acc
            }
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Roughly uniform points on the unit sphere (golden angle spiral).
    pub(crate) fn fibonacci_sphere(n: usize) -> Vec<Vector3<f64>> {
        let golden_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
        (0..n)
            .map(|i| {
                let z = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
                let r = (1.0 - z * z).sqrt();
                let theta = golden_angle * i as f64;
                Vector3::new(r * theta.cos(), r * theta.sin(), z)
            })
            .collect()
    }

    fn octahedron() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
        ]
    }

    fn assert_convex(hull: &ConvexHull) {
        for [a, b, c] in hull.iter_triangles() {
            let normal = (b - a).cross(&(c - a)).normalize();
            let offset = normal.dot(&a);
            assert!(offset > 0.0, "facet is not oriented outwards");
            for p in hull.points() {
                assert!(normal.dot(p) - offset < 1e-9, "point {p:?} is outside of the hull");
            }
        }
    }

    #[test]
    fn tetrahedron() {
        let a = 1.0 / 3f64.sqrt();
        let points = vec![
            Vector3::new(a, a, a),
            Vector3::new(a, -a, -a),
            Vector3::new(-a, a, -a),
            Vector3::new(-a, -a, a),
        ];
        let hull = ConvexHull::new(points).unwrap();
        assert_eq!(hull.facets().len(), 4);
        assert_convex(&hull);
    }

    #[test]
    fn octahedron_has_eight_facets() {
        let hull = ConvexHull::new(octahedron()).unwrap();
        assert_eq!(hull.facets().len(), 8);
        assert_convex(&hull);
    }

    #[test]
    fn interior_points_are_ignored() {
        let mut points = octahedron();
        points.push(Vector3::new(0.1, 0.1, 0.1));
        points.push(Vector3::zeros());
        let hull = ConvexHull::new(points).unwrap();
        assert_eq!(hull.facets().len(), 8);
        for facet in hull.facets() {
            assert!(facet.iter().all(|&i| i < 6));
        }
    }

    #[test]
    fn points_on_sphere_are_all_hull_vertices() {
        let n = 200;
        let hull = ConvexHull::new(fibonacci_sphere(n)).unwrap();
        // Euler's formula for a triangulated sphere
        assert_eq!(hull.facets().len(), 2 * n - 4);
        assert_convex(&hull);

        let used = hull.facets().iter().flatten().collect::<HashSet<_>>();
        assert_eq!(used.len(), n);
    }

    #[test]
    fn closely_spaced_points_are_hull_vertices() {
        // neighbours bulge out of their chords by less than HULL_EPSILON
        let mut points = octahedron();
        points.extend((0..500).map(|i| {
            let lat = 0.6 + i as f64 * 3e-7;
            let lon = 0.3 + i as f64 * 1e-6;
            Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
        }));
        let n = points.len();

        let hull = ConvexHull::new(points).unwrap();
        assert_eq!(hull.facets().len(), 2 * n - 4);

        let used = hull.facets().iter().flatten().collect::<HashSet<_>>();
        assert_eq!(used.len(), n);
    }

    #[test]
    fn every_edge_is_shared_by_two_facets() {
        let hull = ConvexHull::new(fibonacci_sphere(60)).unwrap();
        let mut edges = HashSet::new();
        for &[a, b, c] in hull.facets() {
            for edge in [(a, b), (b, c), (c, a)] {
                assert!(edges.insert(edge), "edge {edge:?} is used twice in one direction");
            }
        }
        for &(a, b) in &edges {
            assert!(edges.contains(&(b, a)), "edge ({a}, {b}) has no twin");
        }
    }

    #[test]
    fn too_few_points() {
        let points = octahedron()[..3].to_vec();
        assert_matches!(
            ConvexHull::new(points),
            Err(HullError::InsufficientPoints(3))
        );
    }

    #[test]
    fn duplicates_do_not_count() {
        let mut points = octahedron()[..3].to_vec();
        points.push(points[0]);
        points.push(points[1]);
        assert_matches!(
            ConvexHull::new(points),
            Err(HullError::InsufficientPoints(3))
        );
    }

    #[test]
    fn coplanar_points() {
        let points = (0..8)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::FRAC_PI_4;
                Vector3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect();
        assert_matches!(
            ConvexHull::new(points),
            Err(HullError::Degenerate("coplanar"))
        );
    }

    #[test]
    fn collinear_points() {
        let points = (0..5)
            .map(|i| Vector3::new(i as f64, 2.0 * i as f64, 0.0))
            .collect();
        assert_matches!(
            ConvexHull::new(points),
            Err(HullError::Degenerate("collinear"))
        );
    }
}
