use futures::future::join_all;
use hazard_atoms::fields::{model::TaskInfo, validate_task_info};
use hazard_atoms::media::{confirm_uploads, image_refs, upload_images, ImageAttachment, ImageUploader};
use hazard_atoms::surveys::{Draft, NewSurvey, Project, RiskNoteSubmission, SurveyBackend, SurveyRecord};
use hazard_atoms::translation::{translate_draft, Translations, Translator};
use hazard_atoms::SurveyError;
use std::collections::BTreeMap;

use crate::alerts::{Alert, AlertSink};

/// Everything the pipeline talks to. Owned by the caller.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub backend: &'a dyn SurveyBackend,
    pub uploader: &'a dyn ImageUploader,
    pub translator: &'a dyn Translator,
    pub alerts: &'a dyn AlertSink,
}

/// Submit a completed draft.
///
/// 1. validate task info (no network yet)
/// 2. create the survey record
/// 3. upload every section's images, concurrently
/// 4. assemble one risk note per draft key
/// 5. post the risk notes against the new survey id
///
/// Steps 2 and 5 are fatal: a "submission failed" alert is shown in
/// `form_lang` and the original error is returned. Upload failures only empty
/// the affected section. With `translate_prompt`, notes lacking translations
/// are machine-translated into `to_langs` before assembly; that step cannot
/// fail the submission either. The draft is not modified; clearing it after
/// success is up to the caller.
pub async fn submit(
    collaborators: &Collaborators<'_>,
    project: &Project,
    task_info: &TaskInfo,
    draft: &Draft,
    translate_prompt: bool,
    form_lang: &str,
    to_langs: &[String],
) -> Result<SurveyRecord, SurveyError> {
    let task_info = validate_task_info(task_info)?;

    tracing::info!(
        "📥 submit: project_id={}, notes={}, form_lang={}, to_langs={:?}",
        project.id,
        draft.len(),
        form_lang,
        to_langs
    );

    let new_survey = NewSurvey {
        project_id: project.id.clone(),
        description: task_info.description,
        description_translations: task_info.description_translations,
        task: task_info.task,
        scaffold_type: task_info.scaffold_type,
        form_lang: form_lang.to_string(),
        to_langs: to_langs.to_vec(),
    };

    let survey = collaborators
        .backend
        .create_survey(new_survey)
        .await
        .map_err(|e| surface_failure(collaborators.alerts, form_lang, "create_survey", e))?;

    tracing::info!("✅ survey created: survey_id={}, project_id={}", survey.id, project.id);

    let uploaded = upload_sections(collaborators.uploader, draft).await;

    let translated = if translate_prompt {
        translate_draft(collaborators.translator, draft, form_lang, to_langs).await
    } else {
        BTreeMap::new()
    };

    let risk_notes = assemble_risk_notes(draft, &uploaded, &translated);

    collaborators
        .backend
        .post_risk_notes(&survey.id, &risk_notes)
        .await
        .map_err(|e| surface_failure(collaborators.alerts, form_lang, "post_risk_notes", e))?;

    tracing::info!(
        "✅ submit success: survey_id={}, risk_notes={}",
        survey.id,
        risk_notes.len()
    );

    Ok(survey)
}

/// Confirmed attachments per section key, for every section that has images.
/// A failed section maps to no attachments.
async fn upload_sections(uploader: &dyn ImageUploader, draft: &Draft) -> BTreeMap<String, Vec<ImageAttachment>> {
    let uploads = draft
        .iter()
        .filter(|(_, entry)| !entry.images.is_empty())
        .map(|(key, entry)| async move {
            let blob_ids = upload_images(uploader, &entry.images, key).await;
            (key.clone(), confirm_uploads(&entry.images, &blob_ids))
        });

    join_all(uploads).await.into_iter().collect()
}

fn assemble_risk_notes(
    draft: &Draft,
    uploaded: &BTreeMap<String, Vec<ImageAttachment>>,
    translated: &BTreeMap<String, Translations>,
) -> Vec<RiskNoteSubmission> {
    draft
        .iter()
        .map(|(key, entry)| {
            let confirmed = uploaded.get(key).map(Vec::as_slice).unwrap_or_default();
            RiskNoteSubmission {
                note: key.clone(),
                description: entry.description.trim().to_string(),
                status: entry.status.as_str().trim().to_string(),
                risk_type: entry.risk_type.clone(),
                images: image_refs(confirmed),
                translations: translated
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| entry.translations.clone()),
            }
        })
        .collect()
}

fn surface_failure(alerts: &dyn AlertSink, form_lang: &str, step: &str, error: SurveyError) -> SurveyError {
    tracing::error!("❌ submit failed at {}: {}", step, error);
    let alert = Alert::SubmissionFailed;
    alerts.show(alert, alert.message(form_lang));
    error
}
