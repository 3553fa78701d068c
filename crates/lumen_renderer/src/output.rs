//! Image file output.

use crate::{RenderError, RenderResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn check_buffer(width: u32, height: u32, rgb: &[u8]) -> RenderResult<()> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: rgb.len(),
        });
    }
    Ok(())
}

/// Write a binary PPM (P6): the header `P6\n<w> <h>\n255\n` followed by the
/// interleaved RGB bytes in row-major order, top row first.
pub fn encode_ppm<W: Write>(mut writer: W, width: u32, height: u32, rgb: &[u8]) -> RenderResult<()> {
    check_buffer(width, height, rgb)?;
    write!(writer, "P6\n{} {}\n255\n", width, height)?;
    writer.write_all(rgb)?;
    writer.flush()?;
    Ok(())
}

/// Write a binary PPM file.
pub fn write_ppm(path: impl AsRef<Path>, width: u32, height: u32, rgb: &[u8]) -> RenderResult<()> {
    let file = File::create(path.as_ref())?;
    encode_ppm(BufWriter::new(file), width, height, rgb)
}

/// Write an image, choosing the format from the file extension.
///
/// `.ppm` or no extension writes a PPM; anything else goes through the
/// `image` crate's encoders.
pub fn write_image(path: impl AsRef<Path>, width: u32, height: u32, rgb: &[u8]) -> RenderResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        return write_ppm(path, width, height, rgb);
    }

    check_buffer(width, height, rgb)?;
    image::save_buffer(path, rgb, width, height, image::ColorType::Rgb8)?;
    log::debug!("Encoded {} via image", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_ppm_layout() {
        let rgb = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        let mut out = Vec::new();
        encode_ppm(&mut out, 2, 2, &rgb).unwrap();

        let header = b"P6\n2 2\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &rgb);
        assert_eq!(out.len(), header.len() + 2 * 2 * 3);
    }

    #[test]
    fn test_wrong_buffer_length_is_rejected() {
        let mut out = Vec::new();
        let err = encode_ppm(&mut out, 2, 2, &[0; 11]).unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 12, actual: 11 }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_png_goes_through_image_encoder() {
        let (width, height) = (3, 2);
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i * 13) as u8).collect();
        let path = std::env::temp_dir().join(format!("lumen_output_test_{}.png", std::process::id()));

        write_image(&path, width, height, &rgb).unwrap();
        let decoded = image::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.dimensions(), (width, height));
        assert_eq!(decoded.to_rgb8().into_raw(), rgb);
    }

    #[test]
    fn test_png_rejects_wrong_buffer_length() {
        let path = std::env::temp_dir().join(format!("lumen_output_short_{}.png", std::process::id()));
        let err = write_image(&path, 2, 2, &[0; 5]).unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 12, actual: 5 }));
        assert!(!path.exists());
    }
}
