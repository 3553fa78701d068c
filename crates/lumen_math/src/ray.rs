use crate::{Vec3, Vec3Ext};

/// Offset applied to spawned ray origins so they do not re-hit the surface they leave.
pub const RAY_EPSILON: f64 = 1e-4;

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized on construction, so `at(t)` measures
/// euclidean distance along the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_self(),
        }
    }

    /// Create a ray leaving `point` along `direction`, with the origin pushed
    /// `RAY_EPSILON` along that direction.
    pub fn offset(point: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize_or_self();
        Self {
            origin: point + direction * RAY_EPSILON,
            direction,
        }
    }

    /// Create a shadow ray from a surface point toward a light position.
    pub fn shadow_ray(point: Vec3, light_pos: Vec3) -> Self {
        Self::offset(point, light_pos - point)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        assert_eq!(ray.direction, Vec3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X * 5.0);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_shadow_ray_offset() {
        let point = Vec3::new(1.0, 1.0, 0.0);
        let light = Vec3::new(1.0, 1.0, 4.0);
        let ray = Ray::shadow_ray(point, light);

        assert_eq!(ray.direction(), Vec3::Z);
        assert!((ray.origin().z - RAY_EPSILON).abs() < 1e-15);
        assert_eq!(ray.origin().x, 1.0);
    }

    #[test]
    fn test_zero_direction_stays_zero() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(ray.direction(), Vec3::ZERO);
    }
}
