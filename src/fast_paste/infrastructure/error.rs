use thiserror::Error;
use crate::domain::error::DomainError;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    // Output path cannot host a sibling temp file.
    #[error("File storage error: {0}")]
    FileStorageError(String),

    // Decoder or PNG encoder failure.
    #[error("Underlying image library error: {0}")]
    ImageLibError(#[from] image::ImageError),

    // Read, write, sync or rename failure.
    #[error("Underlying I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // Decoded samples do not fit the RGBA buffer layout.
    #[error("Domain Error Wrapper: {0}")]
    DomainErrorWrapper(#[from] DomainError),
}
