//! Camera for ray generation.
//!
//! The camera only ever reads its own fields, so one instance is shared by
//! every render thread; randomness comes from the caller's generator.

use crate::sampler::jitter;
use lumen_math::{Ray, Vec3};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Source of primary rays.
pub trait ViewRays: Sync {
    /// Ray through the image-plane point at `(u, v)`, both in `[0, 1]`, with
    /// `v = 1` at the top of the image.
    fn generate_view_ray_uv(&self, u: f64, v: f64) -> Ray;

    /// `n` jittered rays through pixel `(x, y)` of a `width` by `height` image.
    fn generate_random_view_rays(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        n: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<Ray>;
}

/// Sub-pixel sample placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplePattern {
    /// One jittered sample per cell of a `ceil(sqrt(n))` square grid
    #[default]
    Stratified,
    /// Independent uniform offsets
    Uniform,
    /// One sample per row and per column of an `n` by `n` grid
    NRooks,
}

impl SamplePattern {
    /// `n` offsets inside the unit pixel square.
    pub fn offsets(self, n: u32, rng: &mut dyn RngCore) -> Vec<(f64, f64)> {
        let n = n as usize;
        match self {
            SamplePattern::Uniform => (0..n).map(|_| (rng.gen(), rng.gen())).collect(),
            SamplePattern::Stratified => {
                let grid = (n as f64).sqrt().ceil() as usize;
                let m = grid as f64;
                (0..n)
                    .map(|cell| {
                        let (i, j) = (cell / grid, cell % grid);
                        (jitter(j, m, rng), jitter(i, m, rng))
                    })
                    .collect()
            }
            SamplePattern::NRooks => {
                let mut columns: Vec<usize> = (0..n).collect();
                columns.shuffle(rng);
                let m = n as f64;
                columns
                    .into_iter()
                    .enumerate()
                    .map(|(row, col)| (jitter(col, m, rng), jitter(row, m, rng)))
                    .collect()
            }
        }
    }
}

/// Pinhole camera looking through a rectangular image plane.
///
/// The plane is spanned by its corners: `point = ll + (lr - ll) u + (ul - ll) v`.
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    eye: Vec3,
    lower_left: Vec3,
    upper_left: Vec3,
    upper_right: Vec3,
    lower_right: Vec3,
    pattern: SamplePattern,
}

impl PinholeCamera {
    /// Create a camera from the eye position and three image-plane corners.
    ///
    /// The fourth corner completes the parallelogram.
    pub fn new(eye: Vec3, lower_left: Vec3, upper_left: Vec3, lower_right: Vec3) -> Self {
        Self {
            eye,
            lower_left,
            upper_left,
            upper_right: upper_left + (lower_right - lower_left),
            lower_right,
            pattern: SamplePattern::default(),
        }
    }

    /// Camera placed inside the built-in room, looking along +X.
    pub fn room() -> Self {
        Self::new(
            Vec3::new(0.5, 2.0, 2.0),
            Vec3::new(1.0, 1.5, 1.5),
            Vec3::new(1.0, 1.5, 2.5),
            Vec3::new(1.0, 2.5, 1.5),
        )
    }

    /// Set the sub-pixel sample pattern.
    pub fn with_pattern(mut self, pattern: SamplePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn pattern(&self) -> SamplePattern {
        self.pattern
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Image-plane corners: lower left, upper left, upper right, lower right.
    pub fn corners(&self) -> [Vec3; 4] {
        [self.lower_left, self.upper_left, self.upper_right, self.lower_right]
    }

    fn plane_point(&self, u: f64, v: f64) -> Vec3 {
        self.lower_left + (self.lower_right - self.lower_left) * u + (self.upper_left - self.lower_left) * v
    }
}

impl ViewRays for PinholeCamera {
    fn generate_view_ray_uv(&self, u: f64, v: f64) -> Ray {
        Ray::new(self.eye, self.plane_point(u, v) - self.eye)
    }

    fn generate_random_view_rays(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        n: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<Ray> {
        let w = width as f64;
        let h = height as f64;

        self.pattern
            .offsets(n, rng)
            .into_iter()
            .map(|(sx, sy)| {
                let u = (x as f64 + sx) / w;
                let v = 1.0 - (y as f64 + sy) / h;
                self.generate_view_ray_uv(u, v)
            })
            .collect()
    }
}
