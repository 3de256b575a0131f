use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::SurveyError;
use crate::translation::model::Translations;

/// A form field tree: text leaves, string-list leaves and nested records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Record(BTreeMap<String, FieldValue>),
}

/// Untyped JSON only converts when every node is a string, an array of
/// strings or an object. Anything else counts as an empty field.
impl TryFrom<&Value> for FieldValue {
    type Error = SurveyError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(FieldValue::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or(SurveyError::EmptyField))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List),
            Value::Object(entries) => entries
                .iter()
                .map(|(key, v)| Ok((key.clone(), FieldValue::try_from(v)?)))
                .collect::<Result<BTreeMap<_, _>, SurveyError>>()
                .map(FieldValue::Record),
            _ => Err(SurveyError::EmptyField),
        }
    }
}

/// Task-level fields of a survey. All of them are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    #[serde(default)]
    pub task: Vec<String>,
    #[serde(default, alias = "scaffoldType")]
    pub scaffold_type: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "descriptionTranslations")]
    pub description_translations: Translations,
}

impl TaskInfo {
    pub fn to_fields(&self) -> FieldValue {
        let translations = self
            .description_translations
            .iter()
            .map(|(lang, text)| (lang.clone(), FieldValue::Text(text.clone())))
            .collect();

        FieldValue::Record(BTreeMap::from([
            ("task".to_string(), FieldValue::List(self.task.clone())),
            ("scaffold_type".to_string(), FieldValue::List(self.scaffold_type.clone())),
            ("description".to_string(), FieldValue::Text(self.description.clone())),
            ("description_translations".to_string(), FieldValue::Record(translations)),
        ]))
    }

    pub(crate) fn from_fields(fields: &FieldValue) -> Result<Self, SurveyError> {
        let FieldValue::Record(entries) = fields else {
            return Err(SurveyError::EmptyField);
        };

        let list = |key: &str| match entries.get(key) {
            Some(FieldValue::List(items)) => Ok(items.clone()),
            _ => Err(SurveyError::InvalidPayload(format!("{} must be a list", key))),
        };

        let description = match entries.get("description") {
            Some(FieldValue::Text(text)) => text.clone(),
            _ => return Err(SurveyError::InvalidPayload("description must be text".to_string())),
        };

        let description_translations = match entries.get("description_translations") {
            Some(FieldValue::Record(langs)) => langs
                .iter()
                .map(|(lang, v)| match v {
                    FieldValue::Text(text) => Ok((lang.clone(), text.clone())),
                    _ => Err(SurveyError::InvalidPayload(format!(
                        "translation for '{}' must be text",
                        lang
                    ))),
                })
                .collect::<Result<Translations, _>>()?,
            _ => {
                return Err(SurveyError::InvalidPayload(
                    "description_translations must be an object".to_string(),
                ))
            }
        };

        Ok(TaskInfo {
            task: list("task")?,
            scaffold_type: list("scaffold_type")?,
            description,
            description_translations,
        })
    }
}
