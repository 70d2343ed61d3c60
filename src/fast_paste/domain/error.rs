use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Pixel buffer length mismatch: expected {expected} samples, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },
}
