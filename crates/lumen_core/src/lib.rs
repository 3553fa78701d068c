//! Lumen Core - scene primitives and intersection queries.
//!
//! This crate provides:
//!
//! - **Primitives**: `Triangle`, `Sphere`, and `TriangleMesh` (a composite of
//!   triangles sharing one material), unified as the `Primitive` enum
//! - **Scene**: the read-only aggregate queried by the integrator for nearest
//!   hits, shadow-ray occlusion and emissive surfaces
//! - **Room**: the fixed demo scene rendered by the `lumen` binary
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Material, Scene, Sphere};
//! use lumen_math::{Ray, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.add(Sphere::new(Vec3::ZERO, 1.0, Vec3::splat(0.8), Material::Diffuse));
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
//! let hit = scene.nearest_hit(&ray).expect("ray points at the sphere");
//! assert!((hit.t - 4.0).abs() < 1e-9);
//! ```

pub mod hittable;
pub mod material;
pub mod mesh;
pub mod primitive;
pub mod room;
pub mod scene;
pub mod sphere;
pub mod triangle;

// Re-export commonly used types
pub use hittable::{HitRecord, Hittable, PrimitiveKind};
pub use material::{Color, Material};
pub use mesh::TriangleMesh;
pub use primitive::Primitive;
pub use room::build_room;
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::{Triangle, TRIANGLE_EPSILON};
