// Re-export model types and service functions
pub mod model;
pub mod service;

pub use model::{ImageAttachment, ImageRef, UploadPart, UploadPayload, UploadResponse};
pub use service::*;
