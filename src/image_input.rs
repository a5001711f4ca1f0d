//! Background image input
//!
//! Operator photos are accepted in any format the decoder understands and
//! kept as opaque bytes. Dimensions are never validated.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::hashing::sha256_hex;

#[derive(Debug, Error)]
pub enum ImageInputError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized image format")]
    UnknownFormat,

    #[error("Image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

/// Opaque background photo. Cloning shares the underlying bytes.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    pub mime_type: String,
    pub digest: String,
    pub byte_len: usize,
    #[serde(skip)]
    data: Arc<[u8]>,
}

impl BackgroundImage {
    /// Sniffs the format and checks that the bytes decode.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ImageInputError> {
        let format = image::guess_format(&bytes).map_err(|_| ImageInputError::UnknownFormat)?;
        image::load_from_memory_with_format(&bytes, format)?;

        Ok(Self {
            mime_type: format.to_mime_type().to_string(),
            digest: sha256_hex(&bytes),
            byte_len: bytes.len(),
            data: Arc::from(bytes),
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `data:` URI for embedding in the SVG master.
    pub fn data_uri(&self) -> String {
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.data);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

impl PartialEq for BackgroundImage {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.mime_type == other.mime_type
    }
}

impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("mime_type", &self.mime_type)
            .field("digest", &self.digest)
            .field("byte_len", &self.byte_len)
            .finish()
    }
}

/// Reads an operator-supplied photo from disk.
pub fn load_image_file(path: &Path) -> Result<BackgroundImage, ImageInputError> {
    let bytes = fs::read(path)?;
    let image = BackgroundImage::from_bytes(bytes)?;
    tracing::debug!(path = %path.display(), mime = %image.mime_type, bytes = image.byte_len, "loaded background image");
    Ok(image)
}

#[cfg(test)]
pub(crate) fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 80, 20, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_is_sniffed() {
        let img = BackgroundImage::from_bytes(tiny_png()).unwrap();
        assert_eq!(img.mime_type, "image/png");
        assert!(img.data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = BackgroundImage::from_bytes(b"not an image".to_vec()).unwrap_err();
        assert!(matches!(err, ImageInputError::UnknownFormat));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, tiny_png()).unwrap();
        let img = load_image_file(&path).unwrap();
        assert_eq!(img.byte_len, tiny_png().len());
    }
}
