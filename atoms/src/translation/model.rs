use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SurveyError;

pub const NO_LANGUAGES_SELECTED: &str = "No languages selected for translation";
pub const TRANSLATION_FAILED: &str = "Error translating text";

/// Language code -> translated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.0.insert(lang.into(), text.into())
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for Translations {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, String>> for Translations {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Checked conversion for untyped JSON coming off the wire. Anything but an
/// object of strings is rejected.
impl TryFrom<&serde_json::Value> for Translations {
    type Error = SurveyError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let object = value.as_object().ok_or_else(|| {
            SurveyError::InvalidPayload("translations must be an object".to_string())
        })?;

        object
            .iter()
            .map(|(lang, text)| {
                text.as_str()
                    .map(|t| (lang.clone(), t.to_string()))
                    .ok_or_else(|| {
                        SurveyError::InvalidPayload(format!("translation for '{}' is not a string", lang))
                    })
            })
            .collect()
    }
}

/// Outcome of a translation request. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translations: Translations,
    pub error: Option<String>,
}

impl TranslationResult {
    pub fn ok(translations: Translations) -> Self {
        Self { translations, error: None }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            translations: Translations::new(),
            error: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatePayload {
    pub text: String,
    pub from: String,
    #[serde(default)]
    pub to: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_object_of_strings() {
        let translations = Translations::try_from(&json!({"fi": "kypärä", "sv": "hjälm"})).unwrap();
        assert_eq!(translations.len(), 2);
        assert_eq!(translations.get("fi"), Some("kypärä"));
    }

    #[test]
    fn rejects_arrays_and_scalars() {
        assert!(Translations::try_from(&json!(["fi", "sv"])).is_err());
        assert!(Translations::try_from(&json!("fi")).is_err());
        assert!(Translations::try_from(&json!(null)).is_err());
        assert!(Translations::try_from(&json!({"fi": 3})).is_err());
    }

    #[test]
    fn deserialize_rejects_arrays() {
        let parsed: Result<Translations, _> = serde_json::from_value(json!(["a"]));
        assert!(parsed.is_err());
    }
}
