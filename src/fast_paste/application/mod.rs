pub mod background_service;
pub mod error;
