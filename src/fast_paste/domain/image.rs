use crate::domain::error::DomainError;
use crate::domain::threshold::Threshold;

/// Number of interleaved samples per pixel after decoding (R, G, B, A).
pub const RGBA_CHANNELS: u8 = 4;

const ALPHA_OFFSET: usize = 3;

// Decoded, row-major, per-pixel interleaved samples. Owned by a single
// pipeline run and mutated in place by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl RawPixelBuffer {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, DomainError> {
        if channels != RGBA_CHANNELS {
            return Err(DomainError::InvalidInput(format!(
                "expected {} channels, got {}",
                RGBA_CHANNELS, channels
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels as usize))
            .ok_or_else(|| {
                DomainError::InvalidInput(format!("image dimensions {}x{} overflow", width, height))
            })?;

        if data.len() != expected {
            return Err(DomainError::BufferLengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / self.channels as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Sets alpha to 0 for every pixel whose R, G and B are all above
    /// `threshold`, returning how many pixels matched. Colour samples and
    /// non-matching pixels are left untouched.
    pub fn clear_near_white(&mut self, threshold: Threshold) -> usize {
        let mut cleared = 0;
        for pixel in self.data.chunks_exact_mut(self.channels as usize) {
            if threshold.is_near_white(pixel[0], pixel[1], pixel[2]) {
                pixel[ALPHA_OFFSET] = 0;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn transparent_count(&self) -> usize {
        self.data
            .chunks_exact(self.channels as usize)
            .filter(|pixel| pixel[ALPHA_OFFSET] == 0)
            .count()
    }
}
