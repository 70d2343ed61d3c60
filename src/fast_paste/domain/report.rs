use serde::Serialize;
use std::path::PathBuf;

use crate::domain::threshold::Threshold;

/// Outcome of one background removal run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub threshold: Threshold,
    pub total_pixels: usize,
    pub cleared_pixels: usize,
}
