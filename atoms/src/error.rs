/// Errors shared by every atom and by the submission block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    /// Raised before any network call when a required field is blank.
    #[error("Some fields are empty")]
    EmptyField,

    #[error("backend error: {0}")]
    Backend(String),

    #[error("upload error: {0}")]
    Upload(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl SurveyError {
    pub fn is_empty_field(&self) -> bool {
        matches!(self, SurveyError::EmptyField)
    }
}
