//! Tagged union over every primitive the scene can hold.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Sphere, TriangleMesh,
};
use lumen_math::{Interval, Ray};

/// A scene primitive. Stored by value in the scene's single primitive list.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Mesh(TriangleMesh),
    Sphere(Sphere),
}

impl Primitive {
    pub fn material(&self) -> Material {
        match self {
            Primitive::Mesh(mesh) => mesh.material(),
            Primitive::Sphere(sphere) => sphere.material(),
        }
    }

    /// Nearest positive hit distance without building a hit record.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Primitive::Mesh(mesh) => mesh.intersect(ray),
            Primitive::Sphere(sphere) => sphere.intersect(ray),
        }
    }
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        match self {
            Primitive::Mesh(mesh) => mesh.hit(ray, ray_t, rec),
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t, rec),
        }
    }
}

impl From<TriangleMesh> for Primitive {
    fn from(mesh: TriangleMesh) -> Self {
        Primitive::Mesh(mesh)
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}
