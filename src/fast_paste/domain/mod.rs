pub mod error;
pub mod image;
pub mod image_processor_trait;
pub mod report;
pub mod threshold;
