//! Composite objects built from triangles that share one material.

use crate::{
    hittable::{HitRecord, Hittable, PrimitiveKind},
    Color, Material, Triangle,
};
use lumen_math::{Interval, Ray, Vec3};

/// An ordered collection of triangles with a single material tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    material: Material,
}

impl TriangleMesh {
    /// Create an empty mesh with the given material.
    pub fn new(material: Material) -> Self {
        Self {
            triangles: Vec::new(),
            material,
        }
    }

    /// Create a mesh from existing triangles.
    pub fn from_triangles(triangles: Vec<Triangle>, material: Material) -> Self {
        Self {
            triangles,
            material,
        }
    }

    /// A planar quad `a, b, c, d` split into triangles `(a, b, c)` and `(a, c, d)`.
    ///
    /// Both triangles keep the quad's winding, so the quad is visible from the
    /// side its `(b - a) x (c - a)` normal points to.
    pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3, color: Color, material: Material) -> Self {
        Self::from_triangles(
            vec![Triangle::new(a, b, c, color), Triangle::new(a, c, d, color)],
            material,
        )
    }

    /// An axis-aligned cube of twelve outward-facing triangles.
    pub fn cube(center: Vec3, side: f64, color: Color, material: Material) -> Self {
        let h = side / 2.0;
        let corner = |sx: f64, sy: f64, sz: f64| center + Vec3::new(sx * h, sy * h, sz * h);

        // Corners indexed by the sign pattern of (x, y, z)
        let c = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(-1.0, -1.0, 1.0),
            corner(1.0, -1.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
        ];
        let faces = [
            [0, 1, 2, 3], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // -y
            [3, 2, 6, 7], // +y
            [0, 3, 7, 4], // -x
            [1, 2, 6, 5], // +x
        ];

        let mut mesh = Self::new(material);
        for [a, b, cc, d] in faces {
            mesh.push_outward(Triangle::new(c[a], c[b], c[cc], color), center);
            mesh.push_outward(Triangle::new(c[a], c[cc], c[d], color), center);
        }
        mesh
    }

    /// A tetrahedron of four outward-facing triangles.
    pub fn tetrahedron(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3, color: Color, material: Material) -> Self {
        let centroid = (v0 + v1 + v2 + v3) / 4.0;

        let mut mesh = Self::new(material);
        mesh.push_outward(Triangle::new(v0, v1, v2, color), centroid);
        mesh.push_outward(Triangle::new(v0, v2, v3, color), centroid);
        mesh.push_outward(Triangle::new(v0, v3, v1, color), centroid);
        mesh.push_outward(Triangle::new(v1, v3, v2, color), centroid);
        mesh
    }

    /// Add a triangle as given.
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add a triangle, reversing its winding if its normal points toward `interior`.
    fn push_outward(&mut self, triangle: Triangle, interior: Vec3) {
        let outward = triangle.centroid() - interior;
        if triangle.normal().dot(outward) < 0.0 {
            self.triangles.push(triangle.flipped());
        } else {
            self.triangles.push(triangle);
        }
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Closest hit among the triangles, returning the triangle and distance.
    fn closest(&self, ray: &Ray, ray_t: Interval) -> Option<(&Triangle, f64)> {
        let mut closest: Option<(&Triangle, f64)> = None;
        let mut closest_so_far = ray_t.max;

        for tri in &self.triangles {
            if let Some(t) = tri.intersect(ray) {
                if ray_t.with_max(closest_so_far).surrounds(t) {
                    closest_so_far = t;
                    closest = Some((tri, t));
                }
            }
        }

        closest
    }

    /// Nearest positive hit distance, ignoring color and normal.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.closest(ray, Interval::FORWARD).map(|(_, t)| t)
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let Some((tri, t)) = self.closest(ray, ray_t) else {
            return false;
        };

        rec.t = t;
        rec.p = ray.at(t);
        // Flips the winding normal to oppose the incoming ray
        rec.set_face_normal(ray, tri.normal());
        rec.color = tri.color();
        rec.material = self.material;
        rec.kind = PrimitiveKind::Triangle;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_triangle_wins() {
        let near = Triangle::new(
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let far = Triangle::new(
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
            Vec3::new(0.0, 1.0, 3.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        // Both face -Z toward a ray travelling +Z; far is listed first
        let mesh = TriangleMesh::from_triangles(vec![far.flipped(), near.flipped()], Material::Diffuse);

        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(mesh.hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert_eq!(rec.color, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(rec.kind, PrimitiveKind::Triangle);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_cube_is_visible_from_every_axis() {
        let cube = TriangleMesh::cube(Vec3::ZERO, 2.0, Vec3::ONE, Material::Mirror);
        assert_eq!(cube.len(), 12);

        for axis in [Vec3::X, Vec3::Y, Vec3::Z, -Vec3::X, -Vec3::Y, -Vec3::Z] {
            // Offset within the face plane so the ray avoids the shared diagonal
            let jitter = Vec3::new(0.1, 0.2, 0.3);
            let offset = jitter - axis * axis.dot(jitter);
            let ray = Ray::new(axis * 5.0 + offset, -axis);
            let t = cube.intersect(&ray).expect("cube face toward the ray");
            assert!((t - 4.0).abs() < 1e-9, "axis {axis}: t = {t}");
        }
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = TriangleMesh::cube(Vec3::new(1.0, 2.0, 3.0), 1.0, Vec3::ONE, Material::Diffuse);
        for tri in cube.triangles() {
            let outward = tri.centroid() - Vec3::new(1.0, 2.0, 3.0);
            assert!(tri.normal().dot(outward) > 0.0);
        }
    }

    #[test]
    fn test_tetrahedron_normals_point_outward() {
        let v = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let tetra = TriangleMesh::tetrahedron(v[0], v[1], v[2], v[3], Vec3::ONE, Material::Glass);
        assert_eq!(tetra.len(), 4);
        assert_eq!(tetra.material(), Material::Glass);

        let centroid = (v[0] + v[1] + v[2] + v[3]) / 4.0;
        for tri in tetra.triangles() {
            assert!(tri.normal().dot(tri.centroid() - centroid) > 0.0);
        }
    }

    #[test]
    fn test_empty_mesh_never_hits() {
        let mesh = TriangleMesh::new(Material::Diffuse);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(mesh.is_empty());
        assert_eq!(mesh.intersect(&ray), None);
    }
}
