use crate::domain::image::RawPixelBuffer;
use crate::infrastructure::error::InfrastructureError;

// Codec seam: turns container bytes into RGBA samples and back.
#[cfg_attr(test, mockall::automock)]
pub trait ImageProcessor {
    /// Decodes any supported container, forcing an alpha channel.
    fn decode_rgba(&self, image_bytes: &[u8]) -> Result<RawPixelBuffer, InfrastructureError>;

    fn encode_png(&self, buffer: &RawPixelBuffer) -> Result<Vec<u8>, InfrastructureError>;
}
