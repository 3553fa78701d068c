//! Lumen math - vector, ray and interval types shared by the tracer crates.
//!
//! All geometry is computed in double precision. `Vec3` is glam's `DVec3`,
//! re-exported under the name used throughout the workspace.

pub use glam::DVec3 as Vec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::{Ray, RAY_EPSILON};
pub use vector::Vec3Ext;
