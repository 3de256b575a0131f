use super::model::{Draft, NoteStatus, TemplateSurvey};
use crate::fields::model::TaskInfo;
use crate::translation::model::Translations;

/// Pre-fill a fresh draft from a previously submitted survey.
///
/// Task fields are copied wholesale. For every template note whose key exists
/// in `default_draft`, description and status are overwritten; risk type,
/// images and translations keep their defaults. Draft keys missing from the
/// template stay untouched and template keys missing from the draft are
/// dropped.
pub fn merge(template: &TemplateSurvey, default_draft: &Draft) -> (Draft, TaskInfo) {
    let task_info = TaskInfo {
        task: template.task.clone(),
        scaffold_type: template.scaffold_type.clone(),
        description: template.description.clone(),
        description_translations: Translations::new(),
    };

    let mut draft = default_draft.clone();
    for note in &template.risk_notes {
        match draft.get_mut(&note.note) {
            Some(entry) => {
                entry.description = note.description.clone();
                entry.status = NoteStatus::parse(&note.status);
            }
            None => tracing::debug!("template note {} not in form, skipped", note.note),
        }
    }

    (draft, task_info)
}
