use async_trait::async_trait;

use super::model::{Draft, NewSurvey, RiskNoteSubmission, SurveyRecord, SurveyReference, TemplateSurvey};
use super::template::merge;
use crate::error::SurveyError;
use crate::fields::model::TaskInfo;

/// Remote survey store.
#[async_trait]
pub trait SurveyBackend: Send + Sync {
    async fn create_survey(&self, survey: NewSurvey) -> Result<SurveyRecord, SurveyError>;

    async fn post_risk_notes(
        &self,
        survey_id: &str,
        risk_notes: &[RiskNoteSubmission],
    ) -> Result<(), SurveyError>;

    async fn fetch_survey_by_reference(
        &self,
        reference: &SurveyReference,
    ) -> Result<TemplateSurvey, SurveyError>;
}

/// Fetch a template survey and merge it into `default_draft`.
///
/// On error nothing is merged; the caller keeps its default draft.
pub async fn prefill_from_template<B: SurveyBackend + ?Sized>(
    backend: &B,
    url_or_id: &str,
    default_draft: &Draft,
) -> Result<(Draft, TaskInfo), SurveyError> {
    let reference = SurveyReference::parse(url_or_id)
        .ok_or_else(|| SurveyError::InvalidPayload(format!("invalid survey reference '{}'", url_or_id)))?;

    tracing::info!("📥 prefill_from_template: reference={}", reference);

    let template = backend.fetch_survey_by_reference(&reference).await.map_err(|e| {
        tracing::error!("❌ prefill_from_template fetch failed: reference={}, error={}", reference, e);
        e
    })?;

    Ok(merge(&template, default_draft))
}
