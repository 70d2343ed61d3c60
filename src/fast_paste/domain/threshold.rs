use serde::Serialize;
use std::fmt;

/// Per-channel brightness cutoff used to classify a pixel as background.
///
/// Values outside `0..=255` are kept as-is: a negative cutoff matches every
/// pixel and anything from 255 upwards matches none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Threshold(i32);

impl Threshold {
    pub const DEFAULT: Threshold = Threshold(240);

    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Strict greater-than on each of R, G and B; all three must pass.
    #[inline]
    pub fn is_near_white(self, r: u8, g: u8, b: u8) -> bool {
        i32::from(r) > self.0 && i32::from(g) > self.0 && i32::from(b) > self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i32> for Threshold {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
