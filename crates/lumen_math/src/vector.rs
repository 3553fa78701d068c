// Vector utilities for DVec3
//
// glam already covers add/sub/scale/hadamard/dot/cross/length/distance.
// This adds the tracer-specific helpers that glam does not define the way we need.

use crate::Vec3;

/// Extension trait for Vec3 with tracer-specific helpers
pub trait Vec3Ext {
    /// Normalize, returning the vector unchanged when its length is zero.
    ///
    /// glam's `normalize` yields NaN for a zero vector; a degenerate
    /// direction is not an error for the tracer.
    fn normalize_or_self(self) -> Vec3;

    /// Largest of the three components.
    fn max_channel(self) -> f64;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn normalize_or_self(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 {
            self / len
        } else {
            self
        }
    }

    #[inline]
    fn max_channel(self) -> f64 {
        self.max_element()
    }
}
