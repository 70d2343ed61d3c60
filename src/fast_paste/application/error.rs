use thiserror::Error;
use crate::infrastructure::error::InfrastructureError;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Failed to decode input image: {0}")]
    Decode(#[source] InfrastructureError),

    #[error("Failed to encode output image: {0}")]
    Encode(#[source] InfrastructureError),

    #[error("Failed to write output image: {0}")]
    Write(#[source] InfrastructureError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApplicationError {
    /// Process exit status; every failure aborts the run, so all map to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ApplicationError::Decode(_)
            | ApplicationError::Encode(_)
            | ApplicationError::Write(_)
            | ApplicationError::InvalidArgument(_) => 1,
        }
    }
}
