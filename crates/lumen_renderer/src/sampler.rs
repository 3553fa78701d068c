//! Stratified cosine-weighted hemisphere sampling.

use lumen_math::{Ray, Vec3, Vec3Ext, RAY_EPSILON};
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Tangent and bitangent completing `normal` to a right-handed orthonormal basis.
///
/// `Y` is used as the helper "up" axis unless the normal is nearly parallel
/// to it, in which case `X` is used instead.
pub fn orthonormal_basis(normal: Vec3) -> (Vec3, Vec3) {
    let up = if normal.y.abs() < 0.999 { Vec3::Y } else { Vec3::X };
    let tangent = up.cross(normal).normalize_or_self();
    let bitangent = normal.cross(tangent).normalize_or_self();
    (tangent, bitangent)
}

/// Map a point of the unit square to a cosine-weighted direction around +Z.
///
/// `phi = 2 pi u2`, `cos(theta) = sqrt(1 - u1)`.
#[inline]
pub fn cosine_weighted_direction(u1: f64, u2: f64) -> Vec3 {
    let phi = 2.0 * PI * u2;
    let cos_theta = (1.0 - u1).max(0.0).sqrt();
    let sin_theta = u1.max(0.0).sqrt();
    Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Jittered position inside stratum `cell` of `[0, 1)` split into `cells` strata.
///
/// `(cell + xi) / cells` can round up to exactly 1 for the last stratum, so
/// the result is kept strictly below 1.
#[inline]
pub(crate) fn jitter(cell: usize, cells: f64, rng: &mut dyn RngCore) -> f64 {
    ((cell as f64 + rng.gen::<f64>()) / cells).min(1.0 - f64::EPSILON)
}

/// A finite, single-use sequence of rays distributed over the hemisphere
/// around a normal.
///
/// The unit square is split into a `ceil(sqrt(n))` square grid and each cell
/// receives one jittered sample, visited row by row until exactly `n` rays
/// have been produced. Cells past the target count are never drawn.
pub struct HemisphereSampler<'a> {
    origin: Vec3,
    tangent: Vec3,
    bitangent: Vec3,
    normal: Vec3,
    grid: usize,
    next_cell: usize,
    remaining: usize,
    rng: &'a mut dyn RngCore,
}

impl<'a> HemisphereSampler<'a> {
    /// Sample `n` rays leaving `origin` around `normal`.
    ///
    /// Ray origins are pushed `RAY_EPSILON` along the normal.
    pub fn new(origin: Vec3, n: usize, normal: Vec3, rng: &'a mut dyn RngCore) -> Self {
        let normal = normal.normalize_or_self();
        let (tangent, bitangent) = orthonormal_basis(normal);
        let grid = (n as f64).sqrt().ceil() as usize;

        Self {
            origin: origin + normal * RAY_EPSILON,
            tangent,
            bitangent,
            normal,
            grid,
            next_cell: 0,
            remaining: n,
            rng,
        }
    }
}

impl Iterator for HemisphereSampler<'_> {
    type Item = Ray;

    fn next(&mut self) -> Option<Ray> {
        if self.remaining == 0 {
            return None;
        }

        let i = self.next_cell / self.grid;
        let j = self.next_cell % self.grid;
        let m = self.grid as f64;
        let u1 = jitter(i, m, &mut *self.rng);
        let u2 = jitter(j, m, &mut *self.rng);

        let local = cosine_weighted_direction(u1, u2);
        let world = self.tangent * local.x + self.bitangent * local.y + self.normal * local.z;

        self.next_cell += 1;
        self.remaining -= 1;
        Some(Ray::new(self.origin, world))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for HemisphereSampler<'_> {}
