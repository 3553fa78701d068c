//! Conversion of linear radiance to display bytes.

use lumen_core::Color;
use lumen_math::Interval;
use rayon::prelude::*;

/// Gamma 2 transfer: `sqrt` of a non-negative linear value.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Tone map linear pixels into interleaved RGB bytes.
///
/// Each channel is divided by the global `max_value`, gamma corrected, scaled
/// to 255, clamped, and truncated. A non-positive or non-finite `max_value`
/// maps to black.
pub fn tone_map(pixels: &[Color], max_value: f64) -> Vec<u8> {
    let mut rgb = vec![0u8; pixels.len() * 3];
    if !max_value.is_finite() {
        log::warn!("Non-finite maximum radiance {max_value}, writing a black image");
        return rgb;
    }
    if max_value <= 0.0 {
        return rgb;
    }

    let intensity = Interval::new(0.0, 255.0);
    rgb.par_chunks_mut(3)
        .zip(pixels.par_iter())
        .for_each(|(out, pixel)| {
            for (byte, channel) in out.iter_mut().zip(pixel.to_array()) {
                *byte = intensity.clamp(linear_to_gamma(channel / max_value) * 255.0) as u8;
            }
        });

    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma() {
        assert_eq!(linear_to_gamma(0.25), 0.5);
        assert_eq!(linear_to_gamma(1.0), 1.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
    }

    #[test]
    fn test_uniform_input_maps_to_white() {
        // The global maximum normalizes to 1.0 regardless of its value
        let pixels = vec![Color::splat(0.05); 12];
        let rgb = tone_map(&pixels, 0.05);
        assert_eq!(rgb.len(), 36);
        assert!(rgb.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_relative_values() {
        let pixels = [Color::new(1.0, 0.25, 0.0), Color::new(0.0, 0.04, 4.0)];
        let rgb = tone_map(&pixels, 4.0);
        // 1/4 -> 0.5 -> 127, 1/16 -> 0.25 -> 63, 0.01 -> 0.1 -> 25
        assert_eq!(rgb, vec![127, 63, 0, 0, 25, 255]);
    }

    #[test]
    fn test_zero_max_is_black() {
        let rgb = tone_map(&[Color::ZERO; 4], 0.0);
        assert_eq!(rgb, vec![0; 12]);
    }

    #[test]
    fn test_non_finite_max_is_black() {
        let pixels = [Color::new(0.5, f64::INFINITY, 0.1); 2];
        assert_eq!(tone_map(&pixels, f64::INFINITY), vec![0; 6]);
        assert_eq!(tone_map(&pixels, f64::NAN), vec![0; 6]);
    }
}
