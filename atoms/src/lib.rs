//! Domain atoms for hazard survey submission.
//!
//! Each atom owns its model, the service functions that operate on it and the
//! collaborator trait it needs from the outside world. Atoms never construct
//! clients themselves.

pub mod error;
pub mod fields;
pub mod media;
pub mod surveys;
pub mod translation;

pub use error::SurveyError;
