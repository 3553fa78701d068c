//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::Color;
use lumen_math::{Ray, Vec3, Vec3Ext};

/// Tolerance for back-face culling, the parallel-ray test and the minimum hit distance.
pub const TRIANGLE_EPSILON: f64 = 1e-8;

/// A flat-colored triangle.
///
/// Edges and the unit normal are computed once at construction. The normal
/// follows the winding `(v1 - v0) x (v2 - v0)`; rays arriving from behind it
/// are culled.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Flat color
    color: Color,
    /// Pre-computed edges v1 - v0 and v2 - v0
    edge0: Vec3,
    edge1: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: Color) -> Self {
        let edge0 = v1 - v0;
        let edge1 = v2 - v0;
        let normal = edge0.cross(edge1).normalize_or_self();

        Self {
            v0,
            v1,
            v2,
            color,
            edge0,
            edge1,
            normal,
        }
    }

    /// Unit face normal from the winding order.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Same triangle with the winding (and therefore the normal) reversed.
    pub fn flipped(&self) -> Self {
        Self::new(self.v0, self.v2, self.v1, self.color)
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// Returns the hit distance, or `None` when the ray faces the back of the
    /// triangle, runs parallel to its plane, or misses it.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let dir = ray.direction();

        // Normal and ray must be anti-parallel
        if self.normal.dot(dir) > -TRIANGLE_EPSILON {
            return None;
        }

        let r1 = dir.cross(self.edge1);
        let det = self.edge0.dot(r1);

        // Ray is parallel to triangle
        if det.abs() < TRIANGLE_EPSILON {
            return None;
        }

        let c3 = ray.origin() - self.v0;
        let r2 = c3.cross(self.edge0);

        let t = self.edge1.dot(r2) / det;
        let u = c3.dot(r1) / det;
        let v = dir.dot(r2) / det;

        if t > TRIANGLE_EPSILON && u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1, normal +Z
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Vec3::splat(0.5),
        )
    }

    #[test]
    fn test_normal_from_winding() {
        let tri = xy_triangle();
        assert_eq!(tri.normal(), Vec3::Z);
        assert_eq!(tri.flipped().normal(), -Vec3::Z);
    }

    #[test]
    fn test_hit_centroid_along_inward_normal() {
        let tri = xy_triangle();
        let origin = tri.centroid() + tri.normal() * 2.0;
        let ray = Ray::new(origin, -tri.normal());

        let t = tri.intersect(&ray).expect("ray points at centroid");
        assert!(t > 0.0);
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = xy_triangle();
        // In the plane of the triangle
        let in_plane = Ray::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::X);
        assert_eq!(tri.intersect(&in_plane), None);

        // Parallel to the plane, above it
        let above = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert_eq!(tri.intersect(&above), None);
    }

    #[test]
    fn test_back_face_is_culled() {
        let tri = xy_triangle();
        // From behind the triangle, travelling along its normal
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        assert_eq!(tri.intersect(&ray), None);
        assert!(tri.flipped().intersect(&ray).is_some());
    }

    #[test]
    fn test_outside_barycentric_range_misses() {
        let tri = xy_triangle();
        let ray = Ray::new(Vec3::new(3.0, 3.0, 1.0), -Vec3::Z);
        assert_eq!(tri.intersect(&ray), None);
    }

    #[test]
    fn test_triangle_behind_origin_misses() {
        let tri = xy_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), -Vec3::Z);
        assert_eq!(tri.intersect(&ray), None);
    }
}
