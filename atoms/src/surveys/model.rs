use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::media::model::{ImageAttachment, ImageRef};
use crate::translation::model::Translations;

/// Answer state of one hazard category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteStatus {
    #[default]
    #[serde(rename = "", alias = "unset")]
    Unset,
    #[serde(rename = "checked")]
    Checked,
    #[serde(rename = "notRelevant", alias = "not_relevant")]
    NotRelevant,
}

impl NoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStatus::Unset => "",
            NoteStatus::Checked => "checked",
            NoteStatus::NotRelevant => "notRelevant",
        }
    }

    /// Lenient parse for statuses read back from stored surveys.
    pub fn parse(status: &str) -> Self {
        match status.trim() {
            "checked" => NoteStatus::Checked,
            "notRelevant" | "not_relevant" => NoteStatus::NotRelevant,
            _ => NoteStatus::Unset,
        }
    }
}

/// One hazard category of a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskNoteEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: NoteStatus,
    #[serde(default, alias = "riskType")]
    pub risk_type: String,
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
    #[serde(default)]
    pub translations: Translations,
}

impl RiskNoteEntry {
    pub fn new(risk_type: impl Into<String>) -> Self {
        Self {
            risk_type: risk_type.into(),
            ..Self::default()
        }
    }
}

/// In-progress survey form, keyed by note key.
///
/// The key set is fixed when the draft is built; only entry values change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft(BTreeMap<String, RiskNoteEntry>);

impl Draft {
    /// Fresh draft with one default entry per `(note key, risk type)`.
    pub fn from_sections<K, R>(sections: impl IntoIterator<Item = (K, R)>) -> Self
    where
        K: Into<String>,
        R: Into<String>,
    {
        Self(
            sections
                .into_iter()
                .map(|(key, risk_type)| (key.into(), RiskNoteEntry::new(risk_type)))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&RiskNoteEntry> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut RiskNoteEntry> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RiskNoteEntry)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Back to defaults; keys and risk types survive.
    pub fn reset(&mut self) {
        for entry in self.0.values_mut() {
            *entry = RiskNoteEntry::new(std::mem::take(&mut entry.risk_type));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

impl Project {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Arguments of the remote "create survey" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSurvey {
    pub project_id: String,
    pub description: String,
    pub description_translations: Translations,
    pub task: Vec<String>,
    pub scaffold_type: Vec<String>,
    pub form_lang: String,
    pub to_langs: Vec<String>,
}

/// Survey record created by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub id: String,
    pub project_id: String,
    pub description: String,
    #[serde(default)]
    pub description_translations: Translations,
    #[serde(default)]
    pub task: Vec<String>,
    #[serde(default)]
    pub scaffold_type: Vec<String>,
    #[serde(default)]
    pub form_lang: String,
    #[serde(default)]
    pub to_langs: Vec<String>,
    pub created_at: String,
}

/// One risk note as posted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskNoteSubmission {
    pub note: String,
    pub description: String,
    pub status: String,
    pub risk_type: String,
    pub images: Vec<ImageRef>,
    pub translations: Translations,
}

/// A previously submitted survey used to pre-fill a new draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSurvey {
    #[serde(default)]
    pub task: Vec<String>,
    #[serde(default, alias = "scaffoldType")]
    pub scaffold_type: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "riskNotes")]
    pub risk_notes: Vec<TemplateRiskNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRiskNote {
    pub note: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

/// Survey id, taken from a bare id or from the last segment of a survey URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyReference(String);

impl SurveyReference {
    pub fn parse(url_or_id: &str) -> Option<Self> {
        let path = url_or_id.trim().split(['?', '#']).next().unwrap_or_default();
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .map(|id| Self(id.to_string()))
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SurveyReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_deserializes_from_form_state() {
        let draft: Draft = serde_json::from_value(json!({
            "personal_protection": {
                "description": "ok",
                "status": "checked",
                "risk_type": "scaffolding",
                "images": [{"uri": "a.jpg"}]
            },
            "electricity": {}
        }))
        .unwrap();

        let entry = draft.get("personal_protection").unwrap();
        assert_eq!(entry.status, NoteStatus::Checked);
        assert_eq!(entry.images[0].uri, "a.jpg");
        assert!(!entry.images[0].is_landscape);
        assert_eq!(draft.get("electricity").unwrap().status, NoteStatus::Unset);
    }

    #[test]
    fn reset_keeps_keys_and_risk_types() {
        let mut draft = Draft::from_sections([("fall_protection", "scaffolding")]);
        if let Some(entry) = draft.get_mut("fall_protection") {
            entry.description = "missing rails".to_string();
            entry.status = NoteStatus::Checked;
            entry.images.push(ImageAttachment::new("a.jpg", false));
        }

        draft.reset();

        assert_eq!(draft, Draft::from_sections([("fall_protection", "scaffolding")]));
    }

    #[test]
    fn project_id_accepts_numbers() {
        let project: Project = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(project.id, "1");
    }

    #[test]
    fn survey_reference_from_url_or_id() {
        assert_eq!(SurveyReference::parse("42").unwrap().id(), "42");
        assert_eq!(
            SurveyReference::parse("https://app.example.com/surveys/42/?lang=fi").unwrap().id(),
            "42"
        );
        assert!(SurveyReference::parse("  ").is_none());
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(NoteStatus::parse("notRelevant"), NoteStatus::NotRelevant);
        assert_eq!(NoteStatus::parse("bogus"), NoteStatus::Unset);
        assert_eq!(serde_json::to_value(NoteStatus::Unset).unwrap(), json!(""));
    }
}
