// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo decoding and result encoding. These sit at the edge of the pipeline;
// the analysis functions themselves never touch the filesystem.

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use lfascan_core::{LfaError, Result};
use tracing::{debug, info, instrument};

/// Decode a photo from a file path. The format is inferred from the content
/// and extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_photo(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let img = image::open(path.as_ref()).map_err(|err| {
        LfaError::ImageDecode(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(
        width = img.width(),
        height = img.height(),
        "Photo loaded"
    );
    Ok(img)
}

/// Decode a photo from raw encoded bytes (JPEG, PNG, etc.).
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_photo(data: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(data)
        .map_err(|err| LfaError::ImageDecode(format!("failed to decode photo: {}", err)))?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Photo decoded from bytes"
    );
    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| LfaError::ImageEncode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Write an image to a file. The format is inferred from the file extension.
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref()).map_err(|err| {
        LfaError::ImageEncode(format!(
            "failed to save image to {}: {}",
            path.as_ref().display(),
            err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn png_bytes_decode_back() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([1, 2, 3])));
        let bytes = encode_png(&img).unwrap();
        let decoded = decode_photo(&bytes).unwrap();
        assert_eq!(decoded.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_photo(b"definitely not an image").unwrap_err();
        assert!(matches!(err, LfaError::ImageDecode(_)));
    }

    #[test]
    fn missing_file_fails_to_load() {
        let err = load_photo("/nonexistent/lfascan/photo.jpg").unwrap_err();
        assert!(matches!(err, LfaError::ImageDecode(_)));
    }
}
