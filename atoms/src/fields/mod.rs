pub mod model;
pub mod service;

pub use model::{FieldValue, TaskInfo};
pub use service::*;
