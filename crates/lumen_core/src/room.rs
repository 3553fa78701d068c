//! The fixed demo scene: a 4x4x4 room lit by a ceiling panel.
//!
//! Walls are wound so their normals face into the room. Avoid pure primary
//! colors on diffuse surfaces: a zero channel kills every path through it.

use crate::{Color, Material, Scene, Sphere, Triangle, TriangleMesh};
use lumen_math::Vec3;

/// Side length of the room cube.
pub const ROOM_SIZE: f64 = 4.0;

/// Half the side length of the square ceiling light.
const AREA_LIGHT_HALF_SIZE: f64 = 0.5;

/// Build the room scene.
pub fn build_room() -> Scene {
    let light_position = Vec3::new(2.0, 2.0, ROOM_SIZE - 1e-4);
    let mut scene = Scene::new()
        .with_light(light_position, Color::splat(0.9), 5.0)
        .with_ambient(0.01)
        .with_background(Color::splat(0.05));

    add_ceiling_light(&mut scene, light_position);
    add_walls(&mut scene);
    add_props(&mut scene);

    log::debug!(
        "Built room scene: {} primitives, {} lights",
        scene.len(),
        scene.lights().count()
    );
    scene
}

fn add_ceiling_light(scene: &mut Scene, center: Vec3) {
    let s = AREA_LIGHT_HALF_SIZE;
    let v0 = center + Vec3::new(-s, -s, 0.0);
    let v1 = center + Vec3::new(-s, s, 0.0);
    let v2 = center + Vec3::new(s, -s, 0.0);
    let v3 = center + Vec3::new(s, s, 0.0);

    // Faces down into the room
    let mut panel = TriangleMesh::new(Material::Emissive);
    panel.push(Triangle::new(v0, v1, v3, Color::new(1.0, 1.0, 1.0)));
    panel.push(Triangle::new(v0, v3, v2, Color::new(1.0, 0.95, 1.0)));
    scene.add(panel);
}

fn add_walls(scene: &mut Scene) {
    let n = ROOM_SIZE;
    let v0 = Vec3::new(0.0, 0.0, 0.0);
    let v1 = Vec3::new(n, 0.0, 0.0);
    let v2 = Vec3::new(n, n, 0.0);
    let v3 = Vec3::new(0.0, n, 0.0);
    let v4 = Vec3::new(0.0, 0.0, n);
    let v5 = Vec3::new(n, 0.0, n);
    let v6 = Vec3::new(n, n, n);
    let v7 = Vec3::new(0.0, n, n);

    let walls = [
        // floor
        (v0, v1, v2, v3, Color::new(0.8, 0.8, 0.8)),
        // x = 0, behind the camera
        (v0, v3, v7, v4, Color::new(0.7, 0.2, 0.2)),
        // x = n, facing the camera
        (v1, v5, v6, v2, Color::new(0.2, 0.8, 0.2)),
        // y = 0
        (v0, v4, v5, v1, Color::new(0.2, 0.2, 0.8)),
        // y = n
        (v3, v2, v6, v7, Color::new(0.8, 0.8, 0.2)),
        // ceiling
        (v4, v7, v6, v5, Color::new(0.75, 0.75, 0.75)),
    ];

    for (a, b, c, d, color) in walls {
        scene.add(TriangleMesh::quad(a, b, c, d, color, Material::Diffuse));
    }
}

fn add_props(scene: &mut Scene) {
    let white = Color::splat(0.9);

    // Mirror cube half sunk into the y = 0 wall
    scene.add(TriangleMesh::cube(Vec3::new(2.5, 0.0, 2.0), 1.0, white, Material::Mirror));

    // Glass tetrahedron near the far wall, base rotated about its pivot
    let pivot = Vec3::new(3.5, 2.1, 0.0);
    let angle = 32.0_f64.to_radians();
    let rotate_z = |p: Vec3| {
        let (sin, cos) = angle.sin_cos();
        let d = p - pivot;
        Vec3::new(cos * d.x - sin * d.y + pivot.x, sin * d.x + cos * d.y + pivot.y, p.z)
    };
    let apex = Vec3::new(3.5, 2.1, 1.8);
    scene.add(TriangleMesh::tetrahedron(
        rotate_z(Vec3::new(3.1, 1.7, 0.05)),
        rotate_z(Vec3::new(3.9, 1.7, 0.05)),
        rotate_z(Vec3::new(3.5, 2.9, 0.05)),
        apex,
        Color::splat(0.8),
        Material::Glass,
    ));

    // Mirror sphere balanced on the apex
    let radius = 0.75;
    scene.add(Sphere::new(apex + Vec3::new(0.0, 0.0, radius), radius, white, Material::Mirror));

    // Mirror, glass and diffuse spheres in a row
    let radius = 0.2;
    let z = radius + 0.3;
    let (x, y, spacing) = (2.55, 1.25, 0.45);
    scene.add(Sphere::new(Vec3::new(x, y - spacing, z), radius, white, Material::Mirror));
    scene.add(Sphere::new(Vec3::new(x, y, z), radius, white, Material::Glass));
    scene.add(Sphere::new(
        Vec3::new(x, y + spacing, z),
        radius,
        Color::new(1.0, 0.6, 0.8),
        Material::Diffuse,
    ));

    // Mirror cube in the corner with a glass sphere on top
    let cube_center = Vec3::new(3.0, 3.35, 0.3);
    let side = 0.65;
    scene.add(TriangleMesh::cube(cube_center, side, white, Material::Mirror));
    let radius = 0.25;
    scene.add(Sphere::new(
        cube_center + Vec3::new(0.0, 0.0, side / 2.0 + radius),
        radius,
        white,
        Material::Glass,
    ));

    // Small turquoise tetrahedron in front of the corner cube
    scene.add(TriangleMesh::tetrahedron(
        Vec3::new(2.0, 3.4, 0.2),
        Vec3::new(2.3, 3.4, 0.2),
        Vec3::new(2.15, 3.2, 0.2),
        Vec3::new(2.15, 3.33, 0.85),
        Color::new(0.3, 0.9, 0.8),
        Material::Diffuse,
    ));
}
