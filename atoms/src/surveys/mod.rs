// Re-export model types and service functions
pub mod model;
pub mod service;
pub mod template;

pub use model::{
    Draft, NewSurvey, NoteStatus, Project, RiskNoteEntry, RiskNoteSubmission, SurveyRecord,
    SurveyReference, TemplateRiskNote, TemplateSurvey,
};
pub use service::*;
pub use template::*;
