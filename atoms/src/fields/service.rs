use serde_json::Value;
use std::collections::BTreeMap;

use super::model::{FieldValue, TaskInfo};
use crate::error::SurveyError;

/// Trim every leaf of a field record and reject it if anything ends up empty.
///
/// Text leaves are trimmed, list leaves lose their blank elements and records
/// are walked recursively. A blank text, an empty list or an empty record
/// anywhere fails the whole call with [`SurveyError::EmptyField`]. The input
/// is never modified; the normalized tree is returned.
pub fn validate(fields: &FieldValue) -> Result<FieldValue, SurveyError> {
    match fields {
        FieldValue::Record(_) => normalize(fields).ok_or(SurveyError::EmptyField),
        _ => Err(SurveyError::EmptyField),
    }
}

/// Same as [`validate`] for untyped JSON (null, scalars and arrays at the top
/// level are rejected).
pub fn validate_json(value: &Value) -> Result<FieldValue, SurveyError> {
    let fields = FieldValue::try_from(value)?;
    validate(&fields)
}

pub fn validate_task_info(task_info: &TaskInfo) -> Result<TaskInfo, SurveyError> {
    let normalized = validate(&task_info.to_fields()).map_err(|e| {
        tracing::warn!("⚠️ task info rejected: {}", e);
        e
    })?;
    TaskInfo::from_fields(&normalized)
}

fn normalize(value: &FieldValue) -> Option<FieldValue> {
    match value {
        FieldValue::Text(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| FieldValue::Text(trimmed.to_string()))
        }
        FieldValue::List(items) => {
            let kept: Vec<String> = items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect();
            (!kept.is_empty()).then_some(FieldValue::List(kept))
        }
        FieldValue::Record(entries) => {
            if entries.is_empty() {
                return None;
            }
            entries
                .iter()
                .map(|(key, v)| normalize(v).map(|n| (key.clone(), n)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(FieldValue::Record)
        }
    }
}
