use crate::domain::image::{RawPixelBuffer, RGBA_CHANNELS};
use crate::domain::image_processor_trait::ImageProcessor;
use super::error::InfrastructureError;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use std::io::Cursor;

/// `ImageProcessor` backed by the `image` crate.
pub struct DefaultImageProcessor;

impl DefaultImageProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DefaultImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProcessor for DefaultImageProcessor {
    fn decode_rgba(&self, image_bytes: &[u8]) -> Result<RawPixelBuffer, InfrastructureError> {
        let reader = image::io::Reader::new(Cursor::new(image_bytes))
            .with_guessed_format()
            .map_err(InfrastructureError::IoError)?;
        log::debug!("Guessed input format: {:?}", reader.format());

        let decoded = reader.decode().map_err(InfrastructureError::ImageLibError)?;
        log::debug!("Decoded colour type: {:?}", decoded.color());

        // to_rgba8 keeps an existing alpha channel and synthesizes an opaque
        // one otherwise, so the stride is always four samples.
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(RawPixelBuffer::new(width, height, RGBA_CHANNELS, rgba.into_raw())?)
    }

    fn encode_png(&self, buffer: &RawPixelBuffer) -> Result<Vec<u8>, InfrastructureError> {
        let mut output = Cursor::new(Vec::new());
        PngEncoder::new(&mut output)
            .write_image(buffer.as_bytes(), buffer.width(), buffer.height(), ColorType::Rgba8)
            .map_err(InfrastructureError::ImageLibError)?;
        Ok(output.into_inner())
    }
}
